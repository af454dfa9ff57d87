use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub property_id: String,
    pub group_id: String,
    pub created_by: String,
    pub name: String,
    pub address: String,
    pub is_rented: bool,
    pub price_per_day: i32,
    pub size: i32,
    pub rooms: i32,
    pub loan: i32,
    pub property_buy_price: i32,
    pub property_sell_price_now: i32,
    pub date_created: i64,
    pub last_date_rented: i64,
    pub last_day_cleaned: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
