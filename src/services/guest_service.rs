use std::sync::Arc;

use crate::errors::InternalError;
use crate::services::policy::{authorize, Action, PolicyContext};
use crate::services::RoleService;
use crate::stores::guest_store::GuestDetails;
use crate::stores::GuestStore;
use crate::types::db::guest;
use crate::types::internal::Identity;

/// Guest CRUD workflows; mutations require owner/admin, reads require
/// membership of the guest's group.
pub struct GuestService {
    guest_store: Arc<GuestStore>,
    role_service: Arc<RoleService>,
}

impl GuestService {
    pub fn new(guest_store: Arc<GuestStore>, role_service: Arc<RoleService>) -> Self {
        Self {
            guest_store,
            role_service,
        }
    }

    pub async fn create_guest(
        &self,
        actor: &Identity,
        group_id: &str,
        details: GuestDetails,
    ) -> Result<guest::Model, InternalError> {
        if details.first_name.trim().is_empty() || details.last_name.trim().is_empty() {
            return Err(InternalError::validation("name", "first and last name are required"));
        }
        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::ManageGuest, role, &PolicyContext::default())?;
        self.guest_store.create(group_id, &actor.user_id, details).await
    }

    pub async fn get_guest(
        &self,
        actor: &Identity,
        guest_id: &str,
    ) -> Result<guest::Model, InternalError> {
        let guest = self.guest_store.get(guest_id).await?;
        let role = self.role_service.role_of(&guest.group_id, &actor.user_id).await?;
        authorize(Action::ViewGroup, role, &PolicyContext::default())?;
        Ok(guest)
    }

    pub async fn list_guests(
        &self,
        actor: &Identity,
        group_id: &str,
    ) -> Result<Vec<guest::Model>, InternalError> {
        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::ViewGroup, role, &PolicyContext::default())?;
        self.guest_store.list_by_group(group_id).await
    }

    pub async fn update_guest(
        &self,
        actor: &Identity,
        guest_id: &str,
        details: GuestDetails,
    ) -> Result<guest::Model, InternalError> {
        let guest = self.guest_store.get(guest_id).await?;
        let role = self.role_service.role_of(&guest.group_id, &actor.user_id).await?;
        authorize(Action::ManageGuest, role, &PolicyContext::default())?;
        self.guest_store.update(guest_id, details).await
    }

    pub async fn delete_guest(&self, actor: &Identity, guest_id: &str) -> Result<(), InternalError> {
        let guest = self.guest_store.get(guest_id).await?;
        let role = self.role_service.role_of(&guest.group_id, &actor.user_id).await?;
        authorize(Action::ManageGuest, role, &PolicyContext::default())?;
        self.guest_store.delete(guest_id).await
    }
}
