use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::LookupError;
use crate::errors::InternalError;
use crate::types::db::cleaning_notification;

#[derive(Debug, Clone)]
pub struct NewCleaningNotification {
    pub property_id: String,
    pub assigned_to: String,
    pub stay_id: Option<String>,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CleaningUpdate {
    pub assigned_to: Option<String>,
    pub stay_id: Option<Option<String>>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub status: Option<String>,
}

/// CleaningStore manages turnover cleaning notifications
pub struct CleaningStore {
    db: DatabaseConnection,
}

impl CleaningStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn create(
        &self,
        created_by: &str,
        data: NewCleaningNotification,
    ) -> Result<cleaning_notification::Model, InternalError> {
        let now = Utc::now().timestamp();
        let notification = cleaning_notification::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            property_id: Set(data.property_id),
            assigned_to: Set(data.assigned_to),
            stay_id: Set(data.stay_id),
            status: Set(cleaning_notification::STATUS_PENDING.to_string()),
            scheduled_date: Set(data.scheduled_date),
            completed_date: Set(None),
            notes: Set(data.notes),
            created_by: Set(created_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        notification
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_cleaning_notification", e))
    }

    pub async fn find(
        &self,
        id: &str,
    ) -> Result<Option<cleaning_notification::Model>, InternalError> {
        cleaning_notification::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_cleaning_notification", e))
    }

    pub async fn get(&self, id: &str) -> Result<cleaning_notification::Model, InternalError> {
        self.find(id)
            .await?
            .ok_or_else(|| LookupError::CleaningNotification(id.to_string()).into())
    }

    /// Apply a partial update; completion stamps completed_date
    pub async fn apply_update<C: ConnectionTrait>(
        &self,
        conn: &C,
        current: cleaning_notification::Model,
        update: CleaningUpdate,
    ) -> Result<cleaning_notification::Model, InternalError> {
        let completing =
            update.status.as_deref() == Some(cleaning_notification::STATUS_COMPLETED);

        let mut active: cleaning_notification::ActiveModel = current.into();
        if let Some(v) = update.assigned_to {
            active.assigned_to = Set(v);
        }
        if let Some(v) = update.stay_id {
            active.stay_id = Set(v);
        }
        if let Some(v) = update.scheduled_date {
            active.scheduled_date = Set(v);
        }
        if let Some(v) = update.notes {
            active.notes = Set(v);
        }
        if let Some(v) = update.status {
            active.status = Set(v);
        }
        if completing {
            active.completed_date = Set(Some(Utc::now().timestamp()));
        }
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_cleaning_notification", e))
    }

    pub async fn list_by_property(
        &self,
        property_id: &str,
    ) -> Result<Vec<cleaning_notification::Model>, InternalError> {
        cleaning_notification::Entity::find()
            .filter(cleaning_notification::Column::PropertyId.eq(property_id))
            .order_by_desc(cleaning_notification::Column::ScheduledDate)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_by_property", e))
    }

    pub async fn list_assigned_to(
        &self,
        user_id: &str,
    ) -> Result<Vec<cleaning_notification::Model>, InternalError> {
        cleaning_notification::Entity::find()
            .filter(cleaning_notification::Column::AssignedTo.eq(user_id))
            .order_by_desc(cleaning_notification::Column::ScheduledDate)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_assigned_to", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        cleaning_notification::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_cleaning_notification", e))?;
        Ok(())
    }
}
