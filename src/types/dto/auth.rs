use poem_openapi::Object;

/// Request model for registering a new account
#[derive(Object, Debug)]
pub struct RegisterRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub username: String,

    #[oai(validator(min_length = 3, max_length = 255))]
    pub email: String,

    #[oai(validator(min_length = 8, max_length = 255))]
    pub password: String,
}

/// Request model for logging in
#[derive(Object, Debug)]
pub struct LoginRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub username: String,

    #[oai(validator(min_length = 3, max_length = 255))]
    pub password: String,
}

/// Response model carrying a session token
#[derive(Object, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Request model for changing the caller's password
#[derive(Object, Debug)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[oai(validator(min_length = 8, max_length = 255))]
    pub new_password: String,
}
