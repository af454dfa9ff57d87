use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::internal::{
    AccessError, AuthError, BookingError, GroupError, InternalError, LookupError, QuotaError,
};

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// API-level error responses. One status per internal tag; the `error`
/// field carries the specific reason so clients can self-correct.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input or invalid date range
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// Missing/invalid session or deactivated account
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Permission or quota denial
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Referenced entity absent
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Booking conflict or duplicate membership/registration
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(body(error, message, 400))
    }

    pub fn unauthorized(error: &str, message: impl Into<String>) -> Self {
        ApiError::Unauthorized(body(error, message, 401))
    }

    pub fn forbidden(error: &str, message: impl Into<String>) -> Self {
        ApiError::Forbidden(body(error, message, 403))
    }

    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound(body(error, message, 404))
    }

    pub fn conflict(error: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict(body(error, message, 409))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ApiError::InternalError(body("internal_error", message, 500))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(json) => json.0.message.clone(),
            ApiError::Unauthorized(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::NotFound(json) => json.0.message.clone(),
            ApiError::Conflict(json) => json.0.message.clone(),
            ApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match &err {
            InternalError::Validation { .. } => {
                ApiError::bad_request("validation_error", err.to_string())
            }

            InternalError::Auth(auth) => match auth {
                AuthError::Unauthenticated => {
                    ApiError::unauthorized("unauthenticated", auth.to_string())
                }
                AuthError::ExpiredToken => {
                    ApiError::unauthorized("expired_token", auth.to_string())
                }
                AuthError::AccountDeactivated => {
                    ApiError::unauthorized("account_deactivated", auth.to_string())
                }
                AuthError::InvalidCredentials => {
                    ApiError::unauthorized("invalid_credentials", auth.to_string())
                }
                AuthError::Duplicate(_) => ApiError::conflict("duplicate_user", auth.to_string()),
                AuthError::PasswordHashingFailed(_) => {
                    ApiError::internal_error("Internal server error")
                }
            },

            InternalError::Access(access) => {
                let code = match access {
                    AccessError::NotAMember => "not_a_member",
                    AccessError::InsufficientRole => "insufficient_role",
                    AccessError::CannotModifyOwner => "cannot_modify_owner",
                    AccessError::AdminCannotRemoveAdmin => "admin_cannot_remove_admin",
                    AccessError::SelfModificationDenied => "self_modification_denied",
                    AccessError::InsufficientSiteTier => "insufficient_site_tier",
                };
                ApiError::forbidden(code, access.to_string())
            }

            InternalError::Booking(booking) => match booking {
                BookingError::InvalidDateRange => {
                    ApiError::bad_request("invalid_date_range", booking.to_string())
                }
                BookingError::Conflict => {
                    ApiError::conflict("booking_conflict", booking.to_string())
                }
                BookingError::NotCancelled => {
                    ApiError::bad_request("stay_not_cancelled", booking.to_string())
                }
            },

            InternalError::Quota(quota) => {
                let code = match quota {
                    QuotaError::GroupLimitReached => "group_quota_exceeded",
                    QuotaError::PropertyLimitReached => "property_quota_exceeded",
                };
                ApiError::forbidden(code, quota.to_string())
            }

            InternalError::Lookup(lookup) => {
                let code = match lookup {
                    LookupError::Group(_) => "group_not_found",
                    LookupError::Property(_) => "property_not_found",
                    LookupError::Stay(_) => "stay_not_found",
                    LookupError::Guest(_) => "guest_not_found",
                    LookupError::CleaningNotification(_) => "cleaning_notification_not_found",
                    LookupError::User(_) => "user_not_found",
                };
                ApiError::not_found(code, lookup.to_string())
            }

            InternalError::Group(group) => match group {
                GroupError::AlreadyMember(_) => {
                    ApiError::conflict("already_member", group.to_string())
                }
                GroupError::TargetNotMember(_) => {
                    ApiError::not_found("target_not_member", group.to_string())
                }
            },

            InternalError::Database { .. }
            | InternalError::Transaction { .. }
            | InternalError::Parse { .. } => {
                tracing::error!(error = %err, "storage failure");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}
