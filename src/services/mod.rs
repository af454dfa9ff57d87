// Services layer - Decision logic and workflow orchestration
pub mod admin_service;
pub mod booking_service;
pub mod cleaning_service;
pub mod group_service;
pub mod guest_service;
pub mod identity_service;
pub mod policy;
pub mod property_service;
pub mod quota_service;
pub mod role_service;
pub mod token_service;

pub use admin_service::AdminService;
pub use booking_service::BookingService;
pub use cleaning_service::CleaningService;
pub use group_service::GroupService;
pub use guest_service::GuestService;
pub use identity_service::IdentityService;
pub use property_service::PropertyService;
pub use quota_service::QuotaService;
pub use role_service::RoleService;
pub use token_service::TokenService;
