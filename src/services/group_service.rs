use std::sync::Arc;

use crate::errors::internal::{GroupError, QuotaError};
use crate::errors::InternalError;
use crate::services::policy::{authorize, Action, PolicyContext};
use crate::services::{QuotaService, RoleService};
use crate::stores::group_store::MemberRecord;
use crate::stores::{GroupStore, UserStore};
use crate::types::db::group;
use crate::types::internal::{GroupRole, Identity};

/// A member with their effective role resolved; the owner is always
/// reported as owner regardless of stored role rows.
#[derive(Debug, Clone)]
pub struct ResolvedMember {
    pub user_id: String,
    pub username: String,
    pub date_joined: i64,
    pub is_owner: bool,
    pub role: GroupRole,
}

/// A group from the caller's perspective
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub group: group::Model,
    pub is_owner: bool,
    pub role: GroupRole,
}

/// What leaving a group did: owners take the whole group down with them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    GroupDeleted,
}

/// Group membership and lifecycle workflows
pub struct GroupService {
    group_store: Arc<GroupStore>,
    user_store: Arc<UserStore>,
    role_service: Arc<RoleService>,
    quota_service: Arc<QuotaService>,
}

impl GroupService {
    pub fn new(
        group_store: Arc<GroupStore>,
        user_store: Arc<UserStore>,
        role_service: Arc<RoleService>,
        quota_service: Arc<QuotaService>,
    ) -> Self {
        Self {
            group_store,
            user_store,
            role_service,
            quota_service,
        }
    }

    pub async fn create_group(
        &self,
        actor: &Identity,
        name: String,
    ) -> Result<group::Model, InternalError> {
        if name.trim().is_empty() {
            return Err(InternalError::validation("name", "must not be empty"));
        }
        if !self.quota_service.can_create_group(&actor.user_id).await? {
            return Err(QuotaError::GroupLimitReached.into());
        }
        let group = self.group_store.create_group(name, &actor.user_id).await?;
        tracing::info!(group_id = %group.id, owner = %actor.user_id, "group created");
        Ok(group)
    }

    /// Add a user to the group by username
    pub async fn add_member(
        &self,
        actor: &Identity,
        group_id: &str,
        username: &str,
    ) -> Result<(), InternalError> {
        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::AddMember, role, &PolicyContext::default())?;

        let user = self.user_store.get_by_username(username).await?;

        if self.group_store.membership(group_id, &user.id).await?.is_some() {
            return Err(GroupError::AlreadyMember(username.to_string()).into());
        }

        self.group_store.add_member(group_id, &user.id).await
    }

    pub async fn remove_member(
        &self,
        actor: &Identity,
        group_id: &str,
        target_user_id: &str,
    ) -> Result<(), InternalError> {
        let actor_role = self.role_service.role_of(group_id, &actor.user_id).await?;
        let target_role = self.role_service.role_of(group_id, target_user_id).await?;

        authorize(
            Action::RemoveMember,
            actor_role,
            &PolicyContext {
                target_role: Some(target_role),
                ..PolicyContext::default()
            },
        )?;

        if target_role == GroupRole::None {
            return Err(GroupError::TargetNotMember(target_user_id.to_string()).into());
        }

        self.group_store.remove_member(group_id, target_user_id).await?;
        tracing::info!(
            group_id,
            target = target_user_id,
            removed_by = %actor.user_id,
            "member removed"
        );
        Ok(())
    }

    pub async fn update_member_role(
        &self,
        actor: &Identity,
        group_id: &str,
        target_user_id: &str,
        role: &str,
    ) -> Result<(), InternalError> {
        let assigned = GroupRole::parse_assignable(role).ok_or_else(|| {
            InternalError::validation("role", "must be one of member, admin, cleaner")
        })?;

        let actor_role = self.role_service.role_of(group_id, &actor.user_id).await?;
        let target_role = self.role_service.role_of(group_id, target_user_id).await?;

        authorize(
            Action::UpdateMemberRole,
            actor_role,
            &PolicyContext {
                target_role: Some(target_role),
                ..PolicyContext::default()
            },
        )?;

        if target_role == GroupRole::None {
            return Err(GroupError::TargetNotMember(target_user_id.to_string()).into());
        }

        self.group_store
            .upsert_role(group_id, target_user_id, assigned.as_str())
            .await
    }

    pub async fn list_members(
        &self,
        actor: &Identity,
        group_id: &str,
    ) -> Result<Vec<ResolvedMember>, InternalError> {
        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::ViewGroup, role, &PolicyContext::default())?;

        let group = self.group_store.get_group(group_id).await?;
        let records = self.group_store.list_members(group_id).await?;

        Ok(records
            .into_iter()
            .map(|record| resolve_member(&group, record))
            .collect())
    }

    pub async fn list_groups(&self, actor: &Identity) -> Result<Vec<GroupSummary>, InternalError> {
        let records = self.group_store.list_groups_for(&actor.user_id).await?;
        Ok(records
            .into_iter()
            .map(|(group, assignment)| {
                let is_owner = group.owner_id == actor.user_id;
                let role = if is_owner {
                    GroupRole::Owner
                } else {
                    assignment
                        .map(|r| GroupRole::from_assignment(&r))
                        .unwrap_or(GroupRole::Member)
                };
                GroupSummary {
                    group,
                    is_owner,
                    role,
                }
            })
            .collect())
    }

    /// Leave the group. An owner leaving deletes the group and everything
    /// in it; there is no ownership handover path.
    pub async fn leave_group(
        &self,
        actor: &Identity,
        group_id: &str,
    ) -> Result<LeaveOutcome, InternalError> {
        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::LeaveGroup, role, &PolicyContext::default())?;

        if role == GroupRole::Owner {
            self.group_store.delete_group(group_id).await?;
            tracing::info!(group_id, owner = %actor.user_id, "owner left, group deleted");
            return Ok(LeaveOutcome::GroupDeleted);
        }

        self.group_store.remove_member(group_id, &actor.user_id).await?;
        Ok(LeaveOutcome::Left)
    }

    pub async fn delete_group(
        &self,
        actor: &Identity,
        group_id: &str,
    ) -> Result<(), InternalError> {
        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::DeleteGroup, role, &PolicyContext::default())?;

        self.group_store.delete_group(group_id).await?;
        tracing::info!(group_id, deleted_by = %actor.user_id, "group deleted");
        Ok(())
    }
}

fn resolve_member(group: &group::Model, record: MemberRecord) -> ResolvedMember {
    let is_owner = record.user_id == group.owner_id;
    let role = if is_owner {
        GroupRole::Owner
    } else {
        record
            .role_assignment
            .as_deref()
            .map(GroupRole::from_assignment)
            .unwrap_or(GroupRole::Member)
    };
    ResolvedMember {
        user_id: record.user_id,
        username: record.username,
        date_joined: record.date_joined,
        is_owner,
        role,
    }
}
