use chrono::Utc;
use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::{GroupStore, PropertyStore, UserStore};
use crate::types::db::user;

/// Enforces free-tier creation limits and owns the lazy premium expiry.
///
/// Premium is time-boxed: any read of the flag first compares
/// premium_ends_at with now, and on expiry persists the demotion as a side
/// effect of the read. There is no background job.
pub struct QuotaService {
    user_store: Arc<UserStore>,
    group_store: Arc<GroupStore>,
    property_store: Arc<PropertyStore>,
}

impl QuotaService {
    pub fn new(
        user_store: Arc<UserStore>,
        group_store: Arc<GroupStore>,
        property_store: Arc<PropertyStore>,
    ) -> Self {
        Self {
            user_store,
            group_store,
            property_store,
        }
    }

    /// The user's premium flag with expiry applied. Expired premium is
    /// demoted in storage before this returns false.
    pub async fn effective_premium(&self, user: &user::Model) -> Result<bool, InternalError> {
        if !user.is_premium {
            return Ok(false);
        }
        if let Some(ends_at) = user.premium_ends_at {
            if ends_at < Utc::now().timestamp() {
                tracing::info!(user_id = %user.id, "premium expired, demoting");
                self.user_store.clear_premium(&user.id).await?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Load a user with the premium expiry applied, for the current-user
    /// surface. The returned row reflects any demotion just persisted.
    pub async fn current_user(&self, user_id: &str) -> Result<user::Model, InternalError> {
        let user = self.user_store.get_by_id(user_id).await?;
        if user.is_premium && !self.effective_premium(&user).await? {
            return self.user_store.get_by_id(user_id).await;
        }
        Ok(user)
    }

    /// Free-tier users may own at most one group
    pub async fn can_create_group(&self, user_id: &str) -> Result<bool, InternalError> {
        let user = self.user_store.get_by_id(user_id).await?;
        if self.effective_premium(&user).await? {
            return Ok(true);
        }
        Ok(self.group_store.count_owned_by(user_id).await? == 0)
    }

    /// Free-tier users may create at most one property, counted across all
    /// groups
    pub async fn can_create_property(&self, user_id: &str) -> Result<bool, InternalError> {
        let user = self.user_store.get_by_id(user_id).await?;
        if self.effective_premium(&user).await? {
            return Ok(true);
        }
        Ok(self.property_store.count_created_by(user_id).await? == 0)
    }
}
