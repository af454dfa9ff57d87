use serde::{Deserialize, Serialize};

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Username at issue time
    pub username: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// The resolved identity of an authenticated request. Produced by the
/// identity service after signature validation and the active-account check;
/// holding one implies the account was active at resolution time.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_web_admin: bool,
    pub role_id: i32,
}
