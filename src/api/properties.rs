use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::{IdentityService, PropertyService};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::property::{
    PropertyRequest, PropertyResponse, PropertyWithRoleResponse,
};

/// Property endpoints
pub struct PropertyApi {
    property_service: Arc<PropertyService>,
    identity_service: Arc<IdentityService>,
}

impl PropertyApi {
    pub fn new(
        property_service: Arc<PropertyService>,
        identity_service: Arc<IdentityService>,
    ) -> Self {
        Self {
            property_service,
            identity_service,
        }
    }
}

#[derive(Tags)]
enum PropertyTags {
    /// Property management endpoints
    Properties,
}

#[OpenApi]
impl PropertyApi {
    /// Create a property in a group. Free-tier users may create at most one
    /// property across all groups.
    #[oai(
        path = "/groups/:group_id/properties",
        method = "post",
        tag = "PropertyTags::Properties"
    )]
    async fn create_property(
        &self,
        auth: BearerAuth,
        group_id: Path<String>,
        body: Json<PropertyRequest>,
    ) -> Result<Json<PropertyResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let property = self
            .property_service
            .create_property(&identity, &group_id.0, body.0.into())
            .await?;
        Ok(Json(property.into()))
    }

    /// All properties in the caller's groups, with the caller's role
    #[oai(path = "/properties", method = "get", tag = "PropertyTags::Properties")]
    async fn list_properties(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<Vec<PropertyWithRoleResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let properties = self.property_service.list_properties(&identity).await?;
        Ok(Json(properties.into_iter().map(Into::into).collect()))
    }

    /// Get a property (membership required)
    #[oai(
        path = "/properties/:property_id",
        method = "get",
        tag = "PropertyTags::Properties"
    )]
    async fn get_property(
        &self,
        auth: BearerAuth,
        property_id: Path<String>,
    ) -> Result<Json<PropertyResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let property = self
            .property_service
            .get_property(&identity, &property_id.0)
            .await?;
        Ok(Json(property.into()))
    }

    /// Update a property (owner or admin)
    #[oai(
        path = "/properties/:property_id",
        method = "put",
        tag = "PropertyTags::Properties"
    )]
    async fn update_property(
        &self,
        auth: BearerAuth,
        property_id: Path<String>,
        body: Json<PropertyRequest>,
    ) -> Result<Json<PropertyResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let property = self
            .property_service
            .update_property(&identity, &property_id.0, body.0.into())
            .await?;
        Ok(Json(property.into()))
    }

    /// Delete a property. Owners delete any; admins only ones they created.
    #[oai(
        path = "/properties/:property_id",
        method = "delete",
        tag = "PropertyTags::Properties"
    )]
    async fn delete_property(
        &self,
        auth: BearerAuth,
        property_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.property_service
            .delete_property(&identity, &property_id.0)
            .await?;
        Ok(Json(MessageResponse::new("Property deleted successfully")))
    }

    /// Stamp the property's last-cleaned day
    #[oai(
        path = "/properties/:property_id/cleaned",
        method = "post",
        tag = "PropertyTags::Properties"
    )]
    async fn mark_cleaned(
        &self,
        auth: BearerAuth,
        property_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.property_service
            .mark_cleaned(&identity, &property_id.0)
            .await?;
        Ok(Json(MessageResponse::new(
            "Property last day cleaned updated successfully",
        )))
    }

    /// Stamp the property's last-rented date
    #[oai(
        path = "/properties/:property_id/rented",
        method = "post",
        tag = "PropertyTags::Properties"
    )]
    async fn mark_rented(
        &self,
        auth: BearerAuth,
        property_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.property_service
            .mark_rented(&identity, &property_id.0)
            .await?;
        Ok(Json(MessageResponse::new(
            "Property last date rented updated successfully",
        )))
    }
}
