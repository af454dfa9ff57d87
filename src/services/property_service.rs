use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::internal::QuotaError;
use crate::errors::InternalError;
use crate::services::policy::{authorize, Action, PolicyContext};
use crate::services::{QuotaService, RoleService};
use crate::stores::property_store::{NewProperty, PropertyUpdate};
use crate::stores::{GroupStore, PropertyStore};
use crate::types::db::property;
use crate::types::internal::{GroupRole, Identity};

/// A property with the caller's resolved role in its group
#[derive(Debug, Clone)]
pub struct PropertyView {
    pub property: property::Model,
    pub is_owner: bool,
    pub role: GroupRole,
}

/// Property CRUD workflows, gated by group role and creation quota
pub struct PropertyService {
    property_store: Arc<PropertyStore>,
    group_store: Arc<GroupStore>,
    role_service: Arc<RoleService>,
    quota_service: Arc<QuotaService>,
}

impl PropertyService {
    pub fn new(
        property_store: Arc<PropertyStore>,
        group_store: Arc<GroupStore>,
        role_service: Arc<RoleService>,
        quota_service: Arc<QuotaService>,
    ) -> Self {
        Self {
            property_store,
            group_store,
            role_service,
            quota_service,
        }
    }

    pub async fn create_property(
        &self,
        actor: &Identity,
        group_id: &str,
        data: NewProperty,
    ) -> Result<property::Model, InternalError> {
        if !self.quota_service.can_create_property(&actor.user_id).await? {
            return Err(QuotaError::PropertyLimitReached.into());
        }

        let role = self.role_service.role_of(group_id, &actor.user_id).await?;
        authorize(Action::CreateProperty, role, &PolicyContext::default())?;

        let property = self
            .property_store
            .create(group_id, &actor.user_id, data)
            .await?;
        tracing::info!(
            property_id = %property.property_id,
            group_id,
            created_by = %actor.user_id,
            "property created"
        );
        Ok(property)
    }

    /// All properties in the caller's groups, with the caller's role in each
    pub async fn list_properties(
        &self,
        actor: &Identity,
    ) -> Result<Vec<PropertyView>, InternalError> {
        let group_ids = self.group_store.member_group_ids(&actor.user_id).await?;
        let properties = self.property_store.list_for_groups(&group_ids).await?;

        let mut roles: HashMap<String, GroupRole> = HashMap::new();
        for group_id in &group_ids {
            let role = self.role_service.role_of(group_id, &actor.user_id).await?;
            roles.insert(group_id.clone(), role);
        }

        Ok(properties
            .into_iter()
            .map(|property| {
                let role = roles
                    .get(&property.group_id)
                    .copied()
                    .unwrap_or(GroupRole::None);
                PropertyView {
                    is_owner: role == GroupRole::Owner,
                    role,
                    property,
                }
            })
            .collect())
    }

    pub async fn get_property(
        &self,
        actor: &Identity,
        property_id: &str,
    ) -> Result<property::Model, InternalError> {
        let (property, role) = self
            .role_service
            .role_for_property(property_id, &actor.user_id)
            .await?;
        authorize(Action::ViewGroup, role, &PolicyContext::default())?;
        Ok(property)
    }

    pub async fn update_property(
        &self,
        actor: &Identity,
        property_id: &str,
        data: PropertyUpdate,
    ) -> Result<property::Model, InternalError> {
        let (_, role) = self
            .role_service
            .role_for_property(property_id, &actor.user_id)
            .await?;
        authorize(Action::UpdateProperty, role, &PolicyContext::default())?;
        self.property_store.update(property_id, data).await
    }

    /// Delete a property. Admins may only delete properties they created;
    /// owners delete any.
    pub async fn delete_property(
        &self,
        actor: &Identity,
        property_id: &str,
    ) -> Result<(), InternalError> {
        let (property, role) = self
            .role_service
            .role_for_property(property_id, &actor.user_id)
            .await?;
        authorize(
            Action::DeleteProperty,
            role,
            &PolicyContext {
                is_resource_creator: Some(property.created_by == actor.user_id),
                ..PolicyContext::default()
            },
        )?;

        self.property_store.delete(property_id).await?;
        tracing::info!(property_id, deleted_by = %actor.user_id, "property deleted");
        Ok(())
    }

    pub async fn mark_cleaned(
        &self,
        actor: &Identity,
        property_id: &str,
    ) -> Result<(), InternalError> {
        let (_, role) = self
            .role_service
            .role_for_property(property_id, &actor.user_id)
            .await?;
        authorize(Action::UpdateProperty, role, &PolicyContext::default())?;
        self.property_store
            .touch_last_day_cleaned(self.property_store.db(), property_id)
            .await
    }

    /// Public marketplace view: every property not currently rented. Backed
    /// by the properties table; listings are a projection, not their own
    /// store.
    pub async fn browse_listings(&self) -> Result<Vec<property::Model>, InternalError> {
        self.property_store.list_unrented().await
    }

    /// Public lookup of a single listing by property id
    pub async fn get_listing(&self, property_id: &str) -> Result<property::Model, InternalError> {
        self.property_store.get(property_id).await
    }

    pub async fn mark_rented(
        &self,
        actor: &Identity,
        property_id: &str,
    ) -> Result<(), InternalError> {
        let (_, role) = self
            .role_service
            .role_for_property(property_id, &actor.user_id)
            .await?;
        authorize(Action::UpdateProperty, role, &PolicyContext::default())?;
        self.property_store.touch_last_date_rented(property_id).await
    }
}
