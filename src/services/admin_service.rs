use std::sync::Arc;

use crate::errors::internal::AccessError;
use crate::errors::InternalError;
use crate::stores::user_store::AdminUserUpdate;
use crate::stores::UserStore;
use crate::types::db::{role, user};
use crate::types::internal::Identity;

/// Site-level user administration. Every operation requires the web-admin
/// flag, and a web admin can never lock themselves out: self-deactivation,
/// stripping their own web-admin flag, and self-deletion are all denied
/// regardless of any other permission they hold.
pub struct AdminService {
    user_store: Arc<UserStore>,
}

impl AdminService {
    pub fn new(user_store: Arc<UserStore>) -> Self {
        Self { user_store }
    }

    fn require_web_admin(actor: &Identity) -> Result<(), InternalError> {
        if !actor.is_web_admin {
            return Err(AccessError::InsufficientRole.into());
        }
        Ok(())
    }

    pub async fn list_users(
        &self,
        actor: &Identity,
    ) -> Result<Vec<(user::Model, Option<role::Model>)>, InternalError> {
        Self::require_web_admin(actor)?;
        self.user_store.list_with_roles().await
    }

    pub async fn get_user(
        &self,
        actor: &Identity,
        user_id: &str,
    ) -> Result<user::Model, InternalError> {
        Self::require_web_admin(actor)?;
        self.user_store.get_by_id(user_id).await
    }

    pub async fn update_user(
        &self,
        actor: &Identity,
        user_id: &str,
        update: AdminUserUpdate,
    ) -> Result<user::Model, InternalError> {
        Self::require_web_admin(actor)?;

        if user_id == actor.user_id && update.is_active == Some(false) {
            return Err(AccessError::SelfModificationDenied.into());
        }
        if user_id == actor.user_id && update.is_web_admin == Some(false) {
            return Err(AccessError::SelfModificationDenied.into());
        }

        let updated = self.user_store.apply_admin_update(user_id, update).await?;
        tracing::info!(target_user = user_id, updated_by = %actor.user_id, "user updated");
        Ok(updated)
    }

    /// Delete a user and cascade their memberships, role rows and owned
    /// groups. Admins cannot delete themselves.
    pub async fn delete_user(&self, actor: &Identity, user_id: &str) -> Result<(), InternalError> {
        Self::require_web_admin(actor)?;

        if user_id == actor.user_id {
            return Err(AccessError::SelfModificationDenied.into());
        }

        // ensure the user exists so callers get a 404 rather than a no-op
        self.user_store.get_by_id(user_id).await?;
        self.user_store.delete_user_cascade(user_id).await?;
        tracing::info!(target_user = user_id, deleted_by = %actor.user_id, "user deleted");
        Ok(())
    }

    pub async fn make_admin(
        &self,
        actor: &Identity,
        user_id: &str,
    ) -> Result<user::Model, InternalError> {
        Self::require_web_admin(actor)?;
        self.user_store.set_site_admin(user_id).await
    }

    pub async fn set_premium(
        &self,
        actor: &Identity,
        user_id: &str,
        ends_at: Option<i64>,
    ) -> Result<user::Model, InternalError> {
        Self::require_web_admin(actor)?;
        self.user_store.set_premium(user_id, ends_at).await
    }

    pub async fn assign_site_role(
        &self,
        actor: &Identity,
        user_id: &str,
        role_id: i32,
    ) -> Result<user::Model, InternalError> {
        Self::require_web_admin(actor)?;
        self.user_store.set_site_role(user_id, role_id).await
    }
}
