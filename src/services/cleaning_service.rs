use sea_orm::TransactionTrait;
use std::sync::Arc;

use crate::errors::InternalError;
use crate::providers::EventSink;
use crate::services::policy::{authorize, Action, PolicyContext};
use crate::services::RoleService;
use crate::stores::cleaning_store::{CleaningUpdate, NewCleaningNotification};
use crate::stores::{CleaningStore, PropertyStore, UserStore};
use crate::types::db::cleaning_notification;
use crate::types::internal::{ChangeEvent, EventAction, Identity};

const CLEANING_EVENT: &str = "CLEANING_UPDATE";

/// Turnover cleaning workflows. Owners and admins manage notifications;
/// members and cleaners can read them. Completing a notification stamps the
/// property's last-cleaned day.
pub struct CleaningService {
    cleaning_store: Arc<CleaningStore>,
    property_store: Arc<PropertyStore>,
    user_store: Arc<UserStore>,
    role_service: Arc<RoleService>,
    events: Arc<dyn EventSink>,
}

impl CleaningService {
    pub fn new(
        cleaning_store: Arc<CleaningStore>,
        property_store: Arc<PropertyStore>,
        user_store: Arc<UserStore>,
        role_service: Arc<RoleService>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            cleaning_store,
            property_store,
            user_store,
            role_service,
            events,
        }
    }

    pub async fn create_notification(
        &self,
        actor: &Identity,
        data: NewCleaningNotification,
    ) -> Result<cleaning_notification::Model, InternalError> {
        let (_, role) = self
            .role_service
            .role_for_property(&data.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageCleaning, role, &PolicyContext::default())?;

        // assignee must exist before the notification points at them
        self.user_store.get_by_id(&data.assigned_to).await?;

        let created = self.cleaning_store.create(&actor.user_id, data).await?;
        self.emit(EventAction::Create, &created);
        Ok(created)
    }

    pub async fn update_notification(
        &self,
        actor: &Identity,
        id: &str,
        update: CleaningUpdate,
    ) -> Result<cleaning_notification::Model, InternalError> {
        let current = self.cleaning_store.get(id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&current.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageCleaning, role, &PolicyContext::default())?;

        if let Some(status) = update.status.as_deref() {
            let known = [
                cleaning_notification::STATUS_PENDING,
                cleaning_notification::STATUS_IN_PROGRESS,
                cleaning_notification::STATUS_COMPLETED,
                cleaning_notification::STATUS_CANCELLED,
            ];
            if !known.contains(&status) {
                return Err(InternalError::validation(
                    "status",
                    "must be one of pending, in_progress, completed, cancelled",
                ));
            }
        }

        if let Some(assigned_to) = &update.assigned_to {
            self.user_store.get_by_id(assigned_to).await?;
        }

        let completing =
            update.status.as_deref() == Some(cleaning_notification::STATUS_COMPLETED);
        let property_id = current.property_id.clone();

        let txn = self
            .cleaning_store
            .db()
            .begin()
            .await
            .map_err(|e| InternalError::transaction("update_notification", e))?;

        let updated = self.cleaning_store.apply_update(&txn, current, update).await?;
        if completing {
            self.property_store
                .touch_last_day_cleaned(&txn, &property_id)
                .await?;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("update_notification", e))?;

        self.emit(EventAction::Update, &updated);
        Ok(updated)
    }

    pub async fn get_notification(
        &self,
        actor: &Identity,
        id: &str,
    ) -> Result<cleaning_notification::Model, InternalError> {
        let notification = self.cleaning_store.get(id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&notification.property_id, &actor.user_id)
            .await?;
        authorize(Action::ViewCleaning, role, &PolicyContext::default())?;
        Ok(notification)
    }

    /// With a property id: that property's notifications (membership
    /// required). Without: the caller's own assignments.
    pub async fn list_notifications(
        &self,
        actor: &Identity,
        property_id: Option<&str>,
    ) -> Result<Vec<cleaning_notification::Model>, InternalError> {
        match property_id {
            Some(property_id) => {
                let (_, role) = self
                    .role_service
                    .role_for_property(property_id, &actor.user_id)
                    .await?;
                authorize(Action::ViewCleaning, role, &PolicyContext::default())?;
                self.cleaning_store.list_by_property(property_id).await
            }
            None => self.cleaning_store.list_assigned_to(&actor.user_id).await,
        }
    }

    pub async fn delete_notification(
        &self,
        actor: &Identity,
        id: &str,
    ) -> Result<(), InternalError> {
        let current = self.cleaning_store.get(id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&current.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageCleaning, role, &PolicyContext::default())?;

        self.cleaning_store.delete(id).await?;
        self.emit(EventAction::Delete, &current);
        Ok(())
    }

    fn emit(&self, action: EventAction, notification: &cleaning_notification::Model) {
        let payload = serde_json::to_value(notification).unwrap_or_default();
        self.events.emit(ChangeEvent::new(
            CLEANING_EVENT,
            action,
            payload,
            notification.property_id.clone(),
        ));
    }
}
