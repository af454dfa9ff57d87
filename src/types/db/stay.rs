use sea_orm::entity::prelude::*;
use serde::Serialize;

pub const STATUS_UPCOMING: &str = "upcoming";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// A date-ranged booking of a property by a guest. check_in and check_out
/// are calendar dates; check_in < check_out always holds for stored rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "stays")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stay_id: String,
    pub property_id: String,
    pub guest_id: String,
    pub check_in: Date,
    pub check_out: Date,
    pub total_price: i32,
    pub status: String,
    pub payment_status: String,
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::PropertyId"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::GuestId"
    )]
    Guest,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
