use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::internal::AuthError;
use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::Claims;

/// Manages JWT session token generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: 60,
        }
    }

    /// Issue a signed session token for the given user
    pub fn issue(&self, user: &user::Model) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let expiration = now + (self.jwt_expiration_minutes * 60);

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp: expiration,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::parse("jwt", format!("failed to encode token: {}", e)))
    }

    /// Validate a session token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                InternalError::from(AuthError::ExpiredToken)
            } else {
                InternalError::from(AuthError::Unauthenticated)
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn test_user() -> user::Model {
        user::Model {
            id: Uuid::new_v4().to_string(),
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            is_active: true,
            is_admin: false,
            is_web_admin: false,
            is_premium: false,
            premium_ends_at: None,
            role_id: 0,
            date_created: 0,
            last_login: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_issue_then_validate_round_trips_claims() {
        let service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        let user = test_user();

        let token = service.issue(&user).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        let other = TokenService::new("wrong-secret-key-minimum-32-characters".to_string());
        let token = service.issue(&test_user()).unwrap();

        let result = other.validate(&token);
        assert!(matches!(
            result,
            Err(InternalError::Auth(AuthError::Unauthenticated))
        ));
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let secret = "test-secret-key-minimum-32-characters-long";
        let service = TokenService::new(secret.to_string());

        let now = Utc::now().timestamp();
        let expired = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "testuser".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &expired,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let result = service.validate(&token);
        assert!(matches!(
            result,
            Err(InternalError::Auth(AuthError::ExpiredToken))
        ));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        let result = service.validate("not-a-jwt");
        assert!(matches!(
            result,
            Err(InternalError::Auth(AuthError::Unauthenticated))
        ));
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let service = TokenService::new("super-secret-jwt-key-minimum-32-characters".to_string());
        let debug_output = format!("{:?}", service);
        assert!(!debug_output.contains("super-secret-jwt-key"));
        assert!(debug_output.contains("<redacted>"));
    }
}
