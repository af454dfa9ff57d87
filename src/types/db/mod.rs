// Database entities - SeaORM models
pub mod cleaning_notification;
pub mod group;
pub mod group_member;
pub mod group_member_role;
pub mod group_property_permission;
pub mod guest;
pub mod property;
pub mod role;
pub mod stay;
pub mod user;
