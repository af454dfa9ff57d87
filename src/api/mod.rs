// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod cleaning;
pub mod groups;
pub mod guests;
pub mod health;
pub mod listings;
pub mod properties;
pub mod stays;
pub mod users;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use cleaning::CleaningApi;
pub use groups::GroupApi;
pub use guests::GuestApi;
pub use health::HealthApi;
pub use listings::ListingApi;
pub use properties::PropertyApi;
pub use stays::StayApi;
pub use users::UserApi;

use chrono::NaiveDate;
use poem_openapi::{auth::Bearer, SecurityScheme};

use crate::errors::ApiError;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Parse a YYYY-MM-DD calendar date from a request field
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::bad_request(
            "invalid_date",
            format!("{} must be a YYYY-MM-DD date", field),
        )
    })
}
