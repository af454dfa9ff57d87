use poem_openapi::Object;

use crate::types::db::{role, user};

/// A user row as seen by the site admin surface, with their site-role info
#[derive(Object, Debug)]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub date_created: i64,
    pub is_active: bool,
    pub last_login: i64,
    pub is_admin: bool,
    pub is_premium: bool,
    pub premium_ends_at: Option<i64>,
    pub is_web_admin: bool,
    pub notes: String,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub permissions_id: Option<i32>,
}

impl AdminUserResponse {
    pub fn from_user(user: user::Model, role: Option<role::Model>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            date_created: user.date_created,
            is_active: user.is_active,
            last_login: user.last_login,
            is_admin: user.is_admin,
            is_premium: user.is_premium,
            premium_ends_at: user.premium_ends_at,
            is_web_admin: user.is_web_admin,
            notes: user.notes,
            role_id: user.role_id,
            role_name: role.as_ref().map(|r| r.name.clone()),
            permissions_id: role.as_ref().map(|r| r.permissions_id),
        }
    }
}

/// Partial update of a user row by a site admin. Absent fields are left
/// unchanged. premium_ends_at accepts a YYYY-MM-DD date or an empty string
/// meaning "now" (immediate expiry).
#[derive(Object, Debug)]
pub struct AdminUserUpdateRequest {
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
    pub is_web_admin: Option<bool>,
    pub is_premium: Option<bool>,
    pub premium_ends_at: Option<String>,
    pub role_id: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Object, Debug)]
pub struct SetPremiumRequest {
    /// Expiry date (YYYY-MM-DD); absent means no expiry
    pub ends_at: Option<String>,
}

#[derive(Object, Debug)]
pub struct AssignSiteRoleRequest {
    pub role_id: i32,
}
