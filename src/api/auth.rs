use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::{IdentityService, TokenService};
use crate::stores::UserStore;
use crate::types::dto::auth::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, TokenResponse,
};
use crate::types::dto::common::MessageResponse;

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
    identity_service: Arc<IdentityService>,
}

impl AuthApi {
    pub fn new(
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
        identity_service: Arc<IdentityService>,
    ) -> Self {
        Self {
            user_store,
            token_service,
            identity_service,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account and receive a session token
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let body = body.0;
        let user = self
            .user_store
            .add_user(body.username, body.email, body.password)
            .await?;

        let access_token = self.token_service.issue(&user)?;
        Ok(Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        }))
    }

    /// Login with username and password to receive a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let user = self
            .user_store
            .verify_credentials(&body.username, &body.password)
            .await?;
        self.user_store.touch_last_login(&user.id).await?;

        let access_token = self.token_service.issue(&user)?;
        Ok(Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        }))
    }

    /// Change the authenticated user's password
    #[oai(
        path = "/change-password",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn change_password(
        &self,
        auth: BearerAuth,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.user_store
            .change_password(&identity.user_id, &body.current_password, &body.new_password)
            .await?;
        Ok(Json(MessageResponse::new("Password changed successfully")))
    }
}
