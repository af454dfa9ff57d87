use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::{GroupStore, PropertyStore};
use crate::types::db::property;
use crate::types::internal::GroupRole;

/// Resolves a user's effective role within a group.
///
/// This is the single source of truth for role resolution; controllers and
/// services never re-derive ownership or admin-ship from rows themselves.
/// Precedence is fixed and must not be reordered:
///
/// 1. group missing -> GroupNotFound
/// 2. group.owner_id match -> Owner (an explicit role row for the owner,
///    left over from data drift, is ignored)
/// 3. explicit role row -> its role
/// 4. bare membership row -> Member
/// 5. otherwise -> None
pub struct RoleService {
    group_store: Arc<GroupStore>,
    property_store: Arc<PropertyStore>,
}

impl RoleService {
    pub fn new(group_store: Arc<GroupStore>, property_store: Arc<PropertyStore>) -> Self {
        Self {
            group_store,
            property_store,
        }
    }

    pub async fn role_of(&self, group_id: &str, user_id: &str) -> Result<GroupRole, InternalError> {
        let group = self.group_store.get_group(group_id).await?;

        if group.owner_id == user_id {
            return Ok(GroupRole::Owner);
        }

        if let Some(row) = self.group_store.role_row(group_id, user_id).await? {
            return Ok(GroupRole::from_assignment(&row.role));
        }

        if self.group_store.membership(group_id, user_id).await?.is_some() {
            return Ok(GroupRole::Member);
        }

        Ok(GroupRole::None)
    }

    /// Resolve the caller's role for a property-scoped action: load the
    /// property, then resolve against its group.
    pub async fn role_for_property(
        &self,
        property_id: &str,
        user_id: &str,
    ) -> Result<(property::Model, GroupRole), InternalError> {
        let property = self.property_store.get(property_id).await?;
        let role = self.role_of(&property.group_id, user_id).await?;
        Ok((property, role))
    }
}
