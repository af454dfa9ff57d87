use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::internal::LookupError;
use crate::errors::InternalError;
use crate::types::db::guest;

#[derive(Debug, Default, Clone)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub notes: Option<String>,
}

/// GuestStore manages guest records within a group
pub struct GuestStore {
    db: DatabaseConnection,
}

impl GuestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        group_id: &str,
        created_by: &str,
        details: GuestDetails,
    ) -> Result<guest::Model, InternalError> {
        let new_guest = guest::ActiveModel {
            guest_id: Set(Uuid::new_v4().to_string()),
            group_id: Set(group_id.to_string()),
            first_name: Set(details.first_name),
            last_name: Set(details.last_name),
            email: Set(details.email),
            phone: Set(details.phone),
            nationality: Set(details.nationality),
            date_of_birth: Set(details.date_of_birth),
            id_number: Set(details.id_number),
            id_type: Set(details.id_type),
            notes: Set(details.notes),
            created_at: Set(Utc::now().timestamp()),
            created_by: Set(created_by.to_string()),
        };
        new_guest
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_guest", e))
    }

    pub async fn find(&self, guest_id: &str) -> Result<Option<guest::Model>, InternalError> {
        guest::Entity::find_by_id(guest_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_guest", e))
    }

    /// The canonical guest-exists lookup; every caller that needs a guest
    /// row goes through this.
    pub async fn get(&self, guest_id: &str) -> Result<guest::Model, InternalError> {
        self.find(guest_id)
            .await?
            .ok_or_else(|| LookupError::Guest(guest_id.to_string()).into())
    }

    pub async fn list_by_group(&self, group_id: &str) -> Result<Vec<guest::Model>, InternalError> {
        guest::Entity::find()
            .filter(guest::Column::GroupId.eq(group_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_by_group", e))
    }

    pub async fn update(
        &self,
        guest_id: &str,
        details: GuestDetails,
    ) -> Result<guest::Model, InternalError> {
        let guest = self.get(guest_id).await?;
        let mut active: guest::ActiveModel = guest.into();
        active.first_name = Set(details.first_name);
        active.last_name = Set(details.last_name);
        active.email = Set(details.email);
        active.phone = Set(details.phone);
        active.nationality = Set(details.nationality);
        active.date_of_birth = Set(details.date_of_birth);
        active.id_number = Set(details.id_number);
        active.id_type = Set(details.id_type);
        active.notes = Set(details.notes);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_guest", e))
    }

    pub async fn delete(&self, guest_id: &str) -> Result<(), InternalError> {
        guest::Entity::delete_by_id(guest_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_guest", e))?;
        Ok(())
    }
}
