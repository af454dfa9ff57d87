use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{parse_date, BearerAuth};
use crate::errors::ApiError;
use crate::services::{GuestService, IdentityService};
use crate::stores::guest_store::GuestDetails;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::guest::{GuestRequest, GuestResponse};

/// Guest endpoints
pub struct GuestApi {
    guest_service: Arc<GuestService>,
    identity_service: Arc<IdentityService>,
}

impl GuestApi {
    pub fn new(guest_service: Arc<GuestService>, identity_service: Arc<IdentityService>) -> Self {
        Self {
            guest_service,
            identity_service,
        }
    }
}

#[derive(Tags)]
enum GuestTags {
    /// Guest management endpoints
    Guests,
}

fn to_details(req: GuestRequest) -> Result<GuestDetails, ApiError> {
    let date_of_birth = match req.date_of_birth.as_deref() {
        Some(value) => Some(parse_date("date_of_birth", value)?),
        None => None,
    };
    Ok(GuestDetails {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        nationality: req.nationality,
        date_of_birth,
        id_number: req.id_number,
        id_type: req.id_type,
        notes: req.notes,
    })
}

#[OpenApi]
impl GuestApi {
    /// Register a guest in a group (owner or admin)
    #[oai(
        path = "/groups/:group_id/guests",
        method = "post",
        tag = "GuestTags::Guests"
    )]
    async fn create_guest(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
        body: Json<GuestRequest>,
    ) -> Result<Json<GuestResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let guest = self
            .guest_service
            .create_guest(&identity, &group_id.0, to_details(body.0)?)
            .await?;
        Ok(Json(guest.into()))
    }

    /// List a group's guests (membership required)
    #[oai(
        path = "/groups/:group_id/guests",
        method = "get",
        tag = "GuestTags::Guests"
    )]
    async fn list_guests(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
    ) -> Result<Json<Vec<GuestResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let guests = self
            .guest_service
            .list_guests(&identity, &group_id.0)
            .await?;
        Ok(Json(guests.into_iter().map(Into::into).collect()))
    }

    /// Get a guest (membership required)
    #[oai(path = "/guests/:guest_id", method = "get", tag = "GuestTags::Guests")]
    async fn get_guest(
        &self,
        auth: BearerAuth,
        guest_id: Path<String>,
    ) -> Result<Json<GuestResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let guest = self.guest_service.get_guest(&identity, &guest_id.0).await?;
        Ok(Json(guest.into()))
    }

    /// Update a guest (owner or admin)
    #[oai(path = "/guests/:guest_id", method = "put", tag = "GuestTags::Guests")]
    async fn update_guest(
        &self,
        auth: BearerAuth,
        guest_id: Path<String>,
        body: Json<GuestRequest>,
    ) -> Result<Json<GuestResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let guest = self
            .guest_service
            .update_guest(&identity, &guest_id.0, to_details(body.0)?)
            .await?;
        Ok(Json(guest.into()))
    }

    /// Delete a guest (owner or admin)
    #[oai(path = "/guests/:guest_id", method = "delete", tag = "GuestTags::Guests")]
    async fn delete_guest(
        &self,
        auth: BearerAuth,
        guest_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.guest_service
            .delete_guest(&identity, &guest_id.0)
            .await?;
        Ok(Json(MessageResponse::new("Guest deleted successfully")))
    }
}
