use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::{IdentityService, QuotaService};
use crate::stores::UserStore;
use crate::types::dto::user::{CurrentUserResponse, UpdateProfileRequest};

/// Current-user API endpoints
pub struct UserApi {
    user_store: Arc<UserStore>,
    identity_service: Arc<IdentityService>,
    quota_service: Arc<QuotaService>,
}

impl UserApi {
    pub fn new(
        user_store: Arc<UserStore>,
        identity_service: Arc<IdentityService>,
        quota_service: Arc<QuotaService>,
    ) -> Self {
        Self {
            user_store,
            identity_service,
            quota_service,
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// Account endpoints
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// The caller's own account. Reading it applies the lazy premium
    /// expiry: an elapsed premium_ends_at demotes the account in storage
    /// before the response is built.
    #[oai(path = "/me", method = "get", tag = "UserTags::Users")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<CurrentUserResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let user = self.quota_service.current_user(&identity.user_id).await?;
        Ok(Json(user.into()))
    }

    /// Update the caller's username/email
    #[oai(path = "/me", method = "put", tag = "UserTags::Users")]
    async fn update_me(
        &self,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<CurrentUserResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let body = body.0;

        if body.username.is_none() && body.email.is_none() {
            return Err(ApiError::bad_request(
                "validation_error",
                "No fields to update provided",
            ));
        }

        let user = self
            .user_store
            .update_profile(&identity.user_id, body.username, body.email)
            .await?;
        Ok(Json(user.into()))
    }
}
