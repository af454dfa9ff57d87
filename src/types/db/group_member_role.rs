use sea_orm::entity::prelude::*;

/// Explicit role assignment for a member; unique per (group_id, user_id).
/// A member with no row here defaults to "member". The owner's role is
/// derived from groups.owner_id and any row for the owner is ignored.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "group_member_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub role: String,
    pub date_assigned: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
