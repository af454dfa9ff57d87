use chrono::Utc;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{parse_date, BearerAuth};
use crate::errors::ApiError;
use crate::services::{AdminService, IdentityService};
use crate::stores::user_store::AdminUserUpdate;
use crate::types::dto::admin::{
    AdminUserResponse, AdminUserUpdateRequest, AssignSiteRoleRequest, SetPremiumRequest,
};
use crate::types::dto::common::MessageResponse;

/// Site administration endpoints; every operation requires the web-admin
/// flag, checked by the admin service.
pub struct AdminApi {
    admin_service: Arc<AdminService>,
    identity_service: Arc<IdentityService>,
}

impl AdminApi {
    pub fn new(admin_service: Arc<AdminService>, identity_service: Arc<IdentityService>) -> Self {
        Self {
            admin_service,
            identity_service,
        }
    }
}

#[derive(Tags)]
enum AdminTags {
    /// Site administration endpoints
    Admin,
}

/// Normalize a premium expiry field: empty string means "expire now",
/// otherwise a YYYY-MM-DD date.
fn parse_expiry(value: &str) -> Result<i64, ApiError> {
    if value.trim().is_empty() {
        return Ok(Utc::now().timestamp());
    }
    let date = parse_date("premium_ends_at", value)?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ApiError::bad_request("invalid_date", "Invalid premium expiration date"))?;
    Ok(midnight.and_utc().timestamp())
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all users with their site-role info
    #[oai(path = "/users", method = "get", tag = "AdminTags::Admin")]
    async fn list_users(&self, auth: BearerAuth) -> Result<Json<Vec<AdminUserResponse>>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let users = self.admin_service.list_users(&identity).await?;
        Ok(Json(
            users
                .into_iter()
                .map(|(user, role)| AdminUserResponse::from_user(user, role))
                .collect(),
        ))
    }

    /// Get a user by id
    #[oai(path = "/users/:id", method = "get", tag = "AdminTags::Admin")]
    async fn get_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<AdminUserResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let user = self.admin_service.get_user(&identity, &id.0).await?;
        let role = self.identity_service.site_role_of(&user).await?;
        Ok(Json(AdminUserResponse::from_user(user, role)))
    }

    /// Update a user. A web admin cannot deactivate themselves or strip
    /// their own web-admin flag.
    #[oai(path = "/users/:id", method = "put", tag = "AdminTags::Admin")]
    async fn update_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<AdminUserUpdateRequest>,
    ) -> Result<Json<AdminUserResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        let body = body.0;

        let premium_ends_at = match body.premium_ends_at.as_deref() {
            Some(value) => Some(Some(parse_expiry(value)?)),
            None => None,
        };

        let update = AdminUserUpdate {
            is_active: body.is_active,
            is_admin: body.is_admin,
            is_web_admin: body.is_web_admin,
            is_premium: body.is_premium,
            premium_ends_at,
            role_id: body.role_id,
            notes: body.notes,
        };

        let user = self
            .admin_service
            .update_user(&identity, &id.0, update)
            .await?;
        let role = self.identity_service.site_role_of(&user).await?;
        Ok(Json(AdminUserResponse::from_user(user, role)))
    }

    /// Delete a user and all data they own
    #[oai(path = "/users/:id", method = "delete", tag = "AdminTags::Admin")]
    async fn delete_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.admin_service.delete_user(&identity, &id.0).await?;
        Ok(Json(MessageResponse::new(
            "User and all associated data deleted successfully",
        )))
    }

    /// Grant the site-admin flag
    #[oai(
        path = "/users/:id/make-admin",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn make_admin(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.identity_service
            .require_minimum_tier(&identity, 102)
            .await?;
        self.admin_service.make_admin(&identity, &id.0).await?;
        Ok(Json(MessageResponse::new("User is now a site admin")))
    }

    /// Grant premium, optionally time-boxed
    #[oai(path = "/users/:id/premium", method = "post", tag = "AdminTags::Admin")]
    async fn set_premium(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<SetPremiumRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.identity_service
            .require_minimum_tier(&identity, 102)
            .await?;

        let ends_at = match body.0.ends_at.as_deref() {
            Some(value) => Some(parse_expiry(value)?),
            None => None,
        };
        self.admin_service
            .set_premium(&identity, &id.0, ends_at)
            .await?;
        Ok(Json(MessageResponse::new("User premium updated")))
    }

    /// Assign a site role tier to a user
    #[oai(
        path = "/users/:id/site-role",
        method = "post",
        tag = "AdminTags::Admin"
    )]
    async fn assign_site_role(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<AssignSiteRoleRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_service.resolve(&auth.0.token).await?;
        self.identity_service
            .require_minimum_tier(&identity, 102)
            .await?;
        self.admin_service
            .assign_site_role(&identity, &id.0, body.0.role_id)
            .await?;
        Ok(Json(MessageResponse::new("Role assigned")))
    }
}
