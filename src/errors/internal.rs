use thiserror::Error;

/// Internal error type for store and service operations
///
/// This is a hybrid error type that separates:
/// - Infrastructure errors (Database, Transaction, Parse, Validation) -
///   shared by all stores
/// - Domain errors (Auth, Access, Booking, Quota, Lookup, Group) - the
///   typed decision outcomes of the permission and booking layers
///
/// This error type is NOT exposed via API. API endpoints convert it to
/// ApiError at the boundary; every domain tag maps to its own status and
/// reason string so callers never see a collapsed generic failure.
#[derive(Error, Debug)]
pub enum InternalError {
    // ============================================================
    // Infrastructure Errors (shared by all stores)
    // ============================================================

    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Database transaction failed
    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Failed to parse a value (UUID, date, JSON, etc.)
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    /// Malformed input shape
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    // ============================================================
    // Domain Errors
    // ============================================================

    /// Session/identity resolution failures
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Permission denials from the policy engine
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Stay date-range failures
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Free-tier creation limits
    #[error(transparent)]
    Quota(#[from] QuotaError),

    /// Referenced entity absent
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Group membership bookkeeping failures
    #[error(transparent)]
    Group(#[from] GroupError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a transaction error with context
    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a validation error with context
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Identity resolution errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token absent, malformed, or signature invalid
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Token signature valid but past exp
    #[error("Session expired")]
    ExpiredToken,

    /// Resolved user has is_active = false
    #[error("Account deactivated")]
    AccountDeactivated,

    /// Login with unknown username or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration with a taken username or email
    #[error("Already registered: {0}")]
    Duplicate(String),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
}

/// Permission denials. Callers surface these reasons verbatim; logging and
/// observability depend on the specific variant.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("You are not a member of this group")]
    NotAMember,

    #[error("You don't have permission to perform this action")]
    InsufficientRole,

    #[error("The group owner cannot be removed or modified")]
    CannotModifyOwner,

    #[error("Admins cannot remove other admins")]
    AdminCannotRemoveAdmin,

    /// Site-level self-protection: a web admin may not deactivate their own
    /// account or strip their own web-admin flag
    #[error("You cannot modify your own account this way")]
    SelfModificationDenied,

    /// Site tier below the required permission level
    #[error("Your role does not meet the required permission level")]
    InsufficientSiteTier,
}

/// Stay booking errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookingError {
    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Property is already booked for the selected dates")]
    Conflict,

    #[error("Only cancelled stays can be deleted")]
    NotCancelled,
}

/// Free-tier creation limits
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuotaError {
    #[error("Free users can only create one group. Please upgrade to premium for unlimited groups.")]
    GroupLimitReached,

    #[error("Free users can only create one property. Please upgrade to premium for unlimited properties.")]
    PropertyLimitReached,
}

/// Referenced entity absent
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("Group not found: {0}")]
    Group(String),

    #[error("Property not found: {0}")]
    Property(String),

    #[error("Stay not found: {0}")]
    Stay(String),

    #[error("Guest not found: {0}")]
    Guest(String),

    #[error("Cleaning notification not found: {0}")]
    CleaningNotification(String),

    #[error("User not found: {0}")]
    User(String),
}

/// Group membership bookkeeping
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GroupError {
    #[error("User is already a member of this group: {0}")]
    AlreadyMember(String),

    #[error("User is not a member of this group: {0}")]
    TargetNotMember(String),
}
