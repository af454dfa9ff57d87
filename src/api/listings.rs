use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::PropertyService;
use crate::types::dto::listing::ListingResponse;

/// Public marketplace endpoints. No authentication: listings expose only
/// what a prospective guest may see, read straight from durable storage.
pub struct ListingApi {
    property_service: Arc<PropertyService>,
}

impl ListingApi {
    pub fn new(property_service: Arc<PropertyService>) -> Self {
        Self { property_service }
    }
}

#[derive(Tags)]
enum ListingTags {
    /// Public listing endpoints
    Listings,
}

#[OpenApi]
impl ListingApi {
    /// Browse properties currently free for booking
    #[oai(path = "/listings", method = "get", tag = "ListingTags::Listings")]
    async fn list(&self) -> Result<Json<Vec<ListingResponse>>, ApiError> {
        let properties = self.property_service.browse_listings().await?;
        Ok(Json(properties.into_iter().map(Into::into).collect()))
    }

    /// Get a single listing by property id
    #[oai(path = "/listings/:id", method = "get", tag = "ListingTags::Listings")]
    async fn get(&self, id: Path<String>) -> Result<Json<ListingResponse>, ApiError> {
        let property = self.property_service.get_listing(&id.0).await?;
        Ok(Json(property.into()))
    }
}
