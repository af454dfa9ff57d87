use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{parse_date, BearerAuth};
use crate::errors::ApiError;
use crate::services::{CleaningService, IdentityService};
use crate::stores::cleaning_store::{CleaningUpdate, NewCleaningNotification};
use crate::types::dto::cleaning::{CleaningRequest, CleaningResponse, CleaningUpdateRequest};
use crate::types::dto::common::MessageResponse;

/// Cleaning notification endpoints
pub struct CleaningApi {
    cleaning_service: Arc<CleaningService>,
    identity_service: Arc<IdentityService>,
}

impl CleaningApi {
    pub fn new(
        cleaning_service: Arc<CleaningService>,
        identity_service: Arc<IdentityService>,
    ) -> Self {
        Self {
            cleaning_service,
            identity_service,
        }
    }
}

#[derive(Tags)]
enum CleaningTags {
    /// Cleaning workflow endpoints
    Cleaning,
}

#[OpenApi]
impl CleaningApi {
    /// Create a cleaning notification (owner or admin of the property's
    /// group; the assignee must exist)
    #[oai(path = "/cleaning", method = "post", tag = "CleaningTags::Cleaning")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CleaningRequest>,
    ) -> Result<Json<CleaningResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let body = body.0;
        let scheduled_date = parse_date("scheduled_date", &body.scheduled_date)?;

        let notification = self
            .cleaning_service
            .create_notification(
                &identity,
                NewCleaningNotification {
                    property_id: body.property_id,
                    assigned_to: body.assigned_to,
                    stay_id: body.stay_id,
                    scheduled_date,
                    notes: body.notes,
                },
            )
            .await?;
        Ok(Json(notification.into()))
    }

    /// List cleaning notifications: for a property (membership required),
    /// or the caller's own assignments when no property is given
    #[oai(path = "/cleaning", method = "get", tag = "CleaningTags::Cleaning")]
    async fn list(
        &self,
        auth: BearerAuth,
        property_id: Query<Option<String>>,
    ) -> Result<Json<Vec<CleaningResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let notifications = self
            .cleaning_service
            .list_notifications(&identity, property_id.0.as_deref())
            .await?;
        Ok(Json(notifications.into_iter().map(Into::into).collect()))
    }

    /// Get a cleaning notification
    #[oai(path = "/cleaning/:id", method = "get", tag = "CleaningTags::Cleaning")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<CleaningResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let notification = self
            .cleaning_service
            .get_notification(&identity, &id.0)
            .await?;
        Ok(Json(notification.into()))
    }

    /// Update a cleaning notification; completing it stamps the property's
    /// last-cleaned day
    #[oai(path = "/cleaning/:id", method = "put", tag = "CleaningTags::Cleaning")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<CleaningUpdateRequest>,
    ) -> Result<Json<CleaningResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let body = body.0;

        let scheduled_date = match body.scheduled_date.as_deref() {
            Some(value) => Some(parse_date("scheduled_date", value)?),
            None => None,
        };

        let notification = self
            .cleaning_service
            .update_notification(
                &identity,
                &id.0,
                CleaningUpdate {
                    assigned_to: body.assigned_to,
                    stay_id: body.stay_id.map(Some),
                    scheduled_date,
                    notes: body.notes.map(Some),
                    status: body.status,
                },
            )
            .await?;
        Ok(Json(notification.into()))
    }

    /// Delete a cleaning notification
    #[oai(path = "/cleaning/:id", method = "delete", tag = "CleaningTags::Cleaning")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.cleaning_service
            .delete_notification(&identity, &id.0)
            .await?;
        Ok(Json(MessageResponse::new(
            "Cleaning notification deleted successfully",
        )))
    }
}
