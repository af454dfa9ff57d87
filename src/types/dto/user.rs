use poem_openapi::Object;

use crate::types::db::user;

/// The caller's own account, premium expiry already applied
#[derive(Object, Debug)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub role_id: i32,
    pub is_premium: bool,
    pub premium_ends_at: Option<i64>,
}

impl From<user::Model> for CurrentUserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_active: u.is_active,
            is_admin: u.is_admin,
            role_id: u.role_id,
            is_premium: u.is_premium,
            premium_ends_at: u.premium_ends_at,
        }
    }
}

/// Update the caller's own username/email
#[derive(Object, Debug)]
pub struct UpdateProfileRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub username: Option<String>,

    #[oai(validator(min_length = 3, max_length = 255))]
    pub email: Option<String>,
}
