use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{parse_date, BearerAuth};
use crate::errors::ApiError;
use crate::services::{BookingService, IdentityService};
use crate::stores::stay_store::{NewStay, StayUpdate};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::stay::{StayRequest, StayResponse};

/// Stay (booking) endpoints
pub struct StayApi {
    booking_service: Arc<BookingService>,
    identity_service: Arc<IdentityService>,
}

impl StayApi {
    pub fn new(
        booking_service: Arc<BookingService>,
        identity_service: Arc<IdentityService>,
    ) -> Self {
        Self {
            booking_service,
            identity_service,
        }
    }
}

#[derive(Tags)]
enum StayTags {
    /// Booking endpoints
    Stays,
}

#[OpenApi]
impl StayApi {
    /// Book a stay. The conflict check and the insert run atomically;
    /// overlapping or boundary-adjacent active stays are rejected.
    #[oai(path = "/stays", method = "post", tag = "StayTags::Stays")]
    async fn create_stay(
        &self,
        auth: BearerAuth,
        body: Json<StayRequest>,
    ) -> Result<Json<StayResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let body = body.0;
        let check_in = parse_date("check_in_date", &body.check_in_date)?;
        let check_out = parse_date("check_out_date", &body.check_out_date)?;

        let stay = self
            .booking_service
            .create_stay(
                &identity,
                NewStay {
                    property_id: body.property_id,
                    guest_id: body.guest_id,
                    check_in,
                    check_out,
                    total_price: body.total_price,
                    number_of_guests: body.number_of_guests,
                    special_requests: body.special_requests,
                },
            )
            .await?;
        Ok(Json(stay.into()))
    }

    /// All stays across the caller's groups, check-in ascending
    #[oai(path = "/stays/analytics", method = "get", tag = "StayTags::Stays")]
    async fn analytics(&self, auth: BearerAuth) -> Result<Json<Vec<StayResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let stays = self.booking_service.analytics(&identity).await?;
        Ok(Json(stays.into_iter().map(Into::into).collect()))
    }

    /// Get a stay
    #[oai(path = "/stays/:stay_id", method = "get", tag = "StayTags::Stays")]
    async fn get_stay(
        &self,
        auth: BearerAuth,
        stay_id: Path<String>,
    ) -> Result<Json<StayResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let stay = self.booking_service.get_stay(&identity, &stay_id.0).await?;
        Ok(Json(stay.into()))
    }

    /// Update a stay. Unless the update cancels it, the new date range must
    /// not conflict with other stays.
    #[oai(path = "/stays/:stay_id", method = "put", tag = "StayTags::Stays")]
    async fn update_stay(
        &self,
        auth: BearerAuth,
        stay_id: Path<String>,
        body: Json<StayRequest>,
    ) -> Result<Json<StayResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let body = body.0;
        let check_in = parse_date("check_in_date", &body.check_in_date)?;
        let check_out = parse_date("check_out_date", &body.check_out_date)?;

        let stay = self
            .booking_service
            .update_stay(
                &identity,
                &stay_id.0,
                StayUpdate {
                    guest_id: body.guest_id,
                    check_in,
                    check_out,
                    total_price: body.total_price,
                    number_of_guests: body.number_of_guests,
                    special_requests: body.special_requests,
                    status: body.status,
                    payment_status: body.payment_status,
                },
            )
            .await?;
        Ok(Json(stay.into()))
    }

    /// Delete a stay; only cancelled stays may be deleted
    #[oai(path = "/stays/:stay_id", method = "delete", tag = "StayTags::Stays")]
    async fn delete_stay(
        &self,
        auth: BearerAuth,
        stay_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.booking_service
            .delete_stay(&identity, &stay_id.0)
            .await?;
        Ok(Json(MessageResponse::new("Stay deleted successfully")))
    }

    /// Cancel a stay; frees the property if nothing else is active
    #[oai(path = "/stays/:stay_id/cancel", method = "post", tag = "StayTags::Stays")]
    async fn cancel_stay(
        &self,
        auth: BearerAuth,
        stay_id: Path<String>,
    ) -> Result<Json<StayResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let stay = self
            .booking_service
            .cancel_stay(&identity, &stay_id.0)
            .await?;
        Ok(Json(stay.into()))
    }

    /// Complete a stay; frees the property if nothing else is active
    #[oai(
        path = "/stays/:stay_id/complete",
        method = "post",
        tag = "StayTags::Stays"
    )]
    async fn complete_stay(
        &self,
        auth: BearerAuth,
        stay_id: Path<String>,
    ) -> Result<Json<StayResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let stay = self
            .booking_service
            .complete_stay(&identity, &stay_id.0)
            .await?;
        Ok(Json(stay.into()))
    }

    /// List a property's stays, newest check-in first, optionally filtered
    /// by status
    #[oai(
        path = "/properties/:property_id/stays",
        method = "get",
        tag = "StayTags::Stays"
    )]
    async fn list_property_stays(
        &self,
        auth: BearerAuth,
        property_id: Path<String>,
        status: Query<Option<String>>,
    ) -> Result<Json<Vec<StayResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let stays = self
            .booking_service
            .list_property_stays(&identity, &property_id.0, status.0.as_deref())
            .await?;
        Ok(Json(stays.into_iter().map(Into::into).collect()))
    }
}
