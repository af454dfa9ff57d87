use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::internal::LookupError;
use crate::errors::InternalError;
use crate::types::db::{
    cleaning_notification, group, group_member, group_member_role, group_property_permission,
    guest, property, stay, user,
};

/// One row of the member listing: the user plus their stored role
/// assignment, if any. The effective role is resolved by the role service.
#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub user_id: String,
    pub username: String,
    pub date_joined: i64,
    pub role_assignment: Option<String>,
}

/// GroupStore manages groups, memberships and role assignments
pub struct GroupStore {
    db: DatabaseConnection,
}

impl GroupStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a group and its owner membership in one transaction.
    ///
    /// No role row is written for the owner; ownership is derived from
    /// groups.owner_id and the resolver short-circuits on it.
    pub async fn create_group(
        &self,
        name: String,
        owner_id: &str,
    ) -> Result<group::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("create_group", e))?;

        let now = Utc::now().timestamp();
        let new_group = group::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            owner_id: Set(owner_id.to_string()),
            date_created: Set(now),
        };
        let created = new_group
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("create_group", e))?;

        let membership = group_member::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            group_id: Set(created.id.clone()),
            user_id: Set(owner_id.to_string()),
            date_joined: Set(now),
        };
        membership
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("create_group", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("create_group", e))?;
        Ok(created)
    }

    pub async fn find_group(&self, group_id: &str) -> Result<Option<group::Model>, InternalError> {
        group::Entity::find_by_id(group_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_group", e))
    }

    pub async fn get_group(&self, group_id: &str) -> Result<group::Model, InternalError> {
        self.find_group(group_id)
            .await?
            .ok_or_else(|| LookupError::Group(group_id.to_string()).into())
    }

    pub async fn membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<group_member::Model>, InternalError> {
        group_member::Entity::find()
            .filter(group_member::Column::GroupId.eq(group_id))
            .filter(group_member::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("membership", e))
    }

    pub async fn role_row(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<group_member_role::Model>, InternalError> {
        group_member_role::Entity::find()
            .filter(group_member_role::Column::GroupId.eq(group_id))
            .filter(group_member_role::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("role_row", e))
    }

    pub async fn count_owned_by(&self, user_id: &str) -> Result<u64, InternalError> {
        group::Entity::find()
            .filter(group::Column::OwnerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_owned_by", e))
    }

    pub async fn add_member(&self, group_id: &str, user_id: &str) -> Result<(), InternalError> {
        let membership = group_member::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            group_id: Set(group_id.to_string()),
            user_id: Set(user_id.to_string()),
            date_joined: Set(Utc::now().timestamp()),
        };
        membership
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("add_member", e))?;
        Ok(())
    }

    /// Remove a member: membership and any explicit role row go together
    pub async fn remove_member(&self, group_id: &str, user_id: &str) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("remove_member", e))?;

        group_member::Entity::delete_many()
            .filter(group_member::Column::GroupId.eq(group_id))
            .filter(group_member::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("remove_member", e))?;

        group_member_role::Entity::delete_many()
            .filter(group_member_role::Column::GroupId.eq(group_id))
            .filter(group_member_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("remove_member", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("remove_member", e))?;
        Ok(())
    }

    /// Update an existing role row, or insert one if the member had none
    pub async fn upsert_role(
        &self,
        group_id: &str,
        user_id: &str,
        role: &str,
    ) -> Result<(), InternalError> {
        let existing = self.role_row(group_id, user_id).await?;
        match existing {
            Some(row) => {
                let mut active: group_member_role::ActiveModel = row.into();
                active.role = Set(role.to_string());
                active.date_assigned = Set(Utc::now().timestamp());
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| InternalError::database("upsert_role", e))?;
            }
            None => {
                let row = group_member_role::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    group_id: Set(group_id.to_string()),
                    user_id: Set(user_id.to_string()),
                    role: Set(role.to_string()),
                    date_assigned: Set(Utc::now().timestamp()),
                };
                row.insert(&self.db)
                    .await
                    .map_err(|e| InternalError::database("upsert_role", e))?;
            }
        }
        Ok(())
    }

    /// All members of a group with their stored role assignments
    pub async fn list_members(&self, group_id: &str) -> Result<Vec<MemberRecord>, InternalError> {
        let members = group_member::Entity::find()
            .filter(group_member::Column::GroupId.eq(group_id))
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_members", e))?;

        let roles = group_member_role::Entity::find()
            .filter(group_member_role::Column::GroupId.eq(group_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_members", e))?;

        let records = members
            .into_iter()
            .filter_map(|(membership, user)| user.map(|u| (membership, u)))
            .map(|(membership, user)| {
                let role_assignment = roles
                    .iter()
                    .find(|r| r.user_id == membership.user_id)
                    .map(|r| r.role.clone());
                MemberRecord {
                    user_id: membership.user_id,
                    username: user.username,
                    date_joined: membership.date_joined,
                    role_assignment,
                }
            })
            .collect();
        Ok(records)
    }

    /// Groups the user belongs to, with their stored role assignment in each
    pub async fn list_groups_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<(group::Model, Option<String>)>, InternalError> {
        let memberships = group_member::Entity::find()
            .filter(group_member::Column::UserId.eq(user_id))
            .find_also_related(group::Entity)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_groups_for", e))?;

        let roles = group_member_role::Entity::find()
            .filter(group_member_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_groups_for", e))?;

        let records = memberships
            .into_iter()
            .filter_map(|(_, group)| group)
            .map(|group| {
                let role = roles
                    .iter()
                    .find(|r| r.group_id == group.id)
                    .map(|r| r.role.clone());
                (group, role)
            })
            .collect();
        Ok(records)
    }

    pub async fn member_group_ids(&self, user_id: &str) -> Result<Vec<String>, InternalError> {
        let memberships = group_member::Entity::find()
            .filter(group_member::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("member_group_ids", e))?;
        Ok(memberships.into_iter().map(|m| m.group_id).collect())
    }

    /// Delete a group and everything it owns in one transaction
    pub async fn delete_group(&self, group_id: &str) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("delete_group", e))?;
        cascade_delete_group(&txn, group_id).await?;
        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("delete_group", e))?;
        Ok(())
    }
}

/// Cascade deletion of a group inside an open transaction.
///
/// Order is dictated by the foreign keys: cleaning notifications reference
/// stays and properties, stays reference guests and properties, so the
/// deletes run cleaning notifications -> stays -> guests -> permission rows
/// -> properties -> role rows -> memberships -> group.
pub async fn cascade_delete_group<C: ConnectionTrait>(
    conn: &C,
    group_id: &str,
) -> Result<(), InternalError> {
    let property_ids: Vec<String> = property::Entity::find()
        .filter(property::Column::GroupId.eq(group_id))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?
        .into_iter()
        .map(|p| p.property_id)
        .collect();

    if !property_ids.is_empty() {
        cleaning_notification::Entity::delete_many()
            .filter(cleaning_notification::Column::PropertyId.is_in(property_ids.clone()))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("cascade_delete_group", e))?;

        stay::Entity::delete_many()
            .filter(stay::Column::PropertyId.is_in(property_ids.clone()))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("cascade_delete_group", e))?;
    }

    guest::Entity::delete_many()
        .filter(guest::Column::GroupId.eq(group_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?;

    group_property_permission::Entity::delete_many()
        .filter(group_property_permission::Column::GroupId.eq(group_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?;

    property::Entity::delete_many()
        .filter(property::Column::GroupId.eq(group_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?;

    group_member_role::Entity::delete_many()
        .filter(group_member_role::Column::GroupId.eq(group_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?;

    group_member::Entity::delete_many()
        .filter(group_member::Column::GroupId.eq(group_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?;

    group::Entity::delete_by_id(group_id.to_string())
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("cascade_delete_group", e))?;

    Ok(())
}
