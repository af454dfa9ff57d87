use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::internal::LookupError;
use crate::errors::InternalError;
use crate::types::db::{cleaning_notification, group_property_permission, property, stay};

#[derive(Debug, Clone)]
pub struct NewProperty {
    pub name: String,
    pub address: String,
    pub price_per_day: i32,
    pub size: i32,
    pub rooms: i32,
    pub loan: i32,
    pub property_buy_price: i32,
    pub property_sell_price_now: i32,
}

#[derive(Debug, Default, Clone)]
pub struct PropertyUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub price_per_day: Option<i32>,
    pub size: Option<i32>,
    pub rooms: Option<i32>,
    pub loan: Option<i32>,
    pub property_buy_price: Option<i32>,
    pub property_sell_price_now: Option<i32>,
}

/// PropertyStore manages properties and their group permission rows
pub struct PropertyStore {
    db: DatabaseConnection,
}

impl PropertyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a property and its group permission row in one transaction
    pub async fn create(
        &self,
        group_id: &str,
        created_by: &str,
        data: NewProperty,
    ) -> Result<property::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("create_property", e))?;

        let now = Utc::now().timestamp();
        let new_property = property::ActiveModel {
            property_id: Set(Uuid::new_v4().to_string()),
            group_id: Set(group_id.to_string()),
            created_by: Set(created_by.to_string()),
            name: Set(data.name),
            address: Set(data.address),
            is_rented: Set(false),
            price_per_day: Set(data.price_per_day),
            size: Set(data.size),
            rooms: Set(data.rooms),
            loan: Set(data.loan),
            property_buy_price: Set(data.property_buy_price),
            property_sell_price_now: Set(data.property_sell_price_now),
            date_created: Set(now),
            last_date_rented: Set(now),
            last_day_cleaned: Set(now),
        };
        let created = new_property
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("create_property", e))?;

        let permission = group_property_permission::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            property_id: Set(created.property_id.clone()),
            group_id: Set(group_id.to_string()),
            date_created: Set(now),
        };
        permission
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("create_property", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("create_property", e))?;
        Ok(created)
    }

    pub async fn find(&self, property_id: &str) -> Result<Option<property::Model>, InternalError> {
        property::Entity::find_by_id(property_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_property", e))
    }

    pub async fn get(&self, property_id: &str) -> Result<property::Model, InternalError> {
        self.find(property_id)
            .await?
            .ok_or_else(|| LookupError::Property(property_id.to_string()).into())
    }

    pub async fn list_for_groups(
        &self,
        group_ids: &[String],
    ) -> Result<Vec<property::Model>, InternalError> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        property::Entity::find()
            .filter(property::Column::GroupId.is_in(group_ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_for_groups", e))
    }

    pub async fn update(
        &self,
        property_id: &str,
        data: PropertyUpdate,
    ) -> Result<property::Model, InternalError> {
        let property = self.get(property_id).await?;
        let mut active: property::ActiveModel = property.into();
        if let Some(v) = data.name {
            active.name = Set(v);
        }
        if let Some(v) = data.address {
            active.address = Set(v);
        }
        if let Some(v) = data.price_per_day {
            active.price_per_day = Set(v);
        }
        if let Some(v) = data.size {
            active.size = Set(v);
        }
        if let Some(v) = data.rooms {
            active.rooms = Set(v);
        }
        if let Some(v) = data.loan {
            active.loan = Set(v);
        }
        if let Some(v) = data.property_buy_price {
            active.property_buy_price = Set(v);
        }
        if let Some(v) = data.property_sell_price_now {
            active.property_sell_price_now = Set(v);
        }
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_property", e))
    }

    /// Delete a property and its dependents (cleaning notifications, stays,
    /// permission rows) in one transaction
    pub async fn delete(&self, property_id: &str) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("delete_property", e))?;

        cleaning_notification::Entity::delete_many()
            .filter(cleaning_notification::Column::PropertyId.eq(property_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_property", e))?;

        stay::Entity::delete_many()
            .filter(stay::Column::PropertyId.eq(property_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_property", e))?;

        group_property_permission::Entity::delete_many()
            .filter(group_property_permission::Column::PropertyId.eq(property_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_property", e))?;

        property::Entity::delete_by_id(property_id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_property", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("delete_property", e))?;
        Ok(())
    }

    /// Properties currently free for new bookings, for the public listing
    /// surface
    pub async fn list_unrented(&self) -> Result<Vec<property::Model>, InternalError> {
        property::Entity::find()
            .filter(property::Column::IsRented.eq(false))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_unrented", e))
    }

    /// Properties this user has created, across all groups (quota input)
    pub async fn count_created_by(&self, user_id: &str) -> Result<u64, InternalError> {
        property::Entity::find()
            .filter(property::Column::CreatedBy.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_created_by", e))
    }

    pub async fn set_rented<C: ConnectionTrait>(
        &self,
        conn: &C,
        property_id: &str,
        is_rented: bool,
    ) -> Result<(), InternalError> {
        let property = property::Entity::find_by_id(property_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("set_rented", e))?
            .ok_or_else(|| LookupError::Property(property_id.to_string()))?;
        let mut active: property::ActiveModel = property.into();
        active.is_rented = Set(is_rented);
        if is_rented {
            active.last_date_rented = Set(Utc::now().timestamp());
        }
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_rented", e))?;
        Ok(())
    }

    pub async fn touch_last_day_cleaned<C: ConnectionTrait>(
        &self,
        conn: &C,
        property_id: &str,
    ) -> Result<(), InternalError> {
        let property = property::Entity::find_by_id(property_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("touch_last_day_cleaned", e))?
            .ok_or_else(|| LookupError::Property(property_id.to_string()))?;
        let mut active: property::ActiveModel = property.into();
        active.last_day_cleaned = Set(Utc::now().timestamp());
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("touch_last_day_cleaned", e))?;
        Ok(())
    }

    pub async fn touch_last_date_rented(&self, property_id: &str) -> Result<(), InternalError> {
        let property = self.get(property_id).await?;
        let mut active: property::ActiveModel = property.into();
        active.last_date_rented = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("touch_last_date_rented", e))?;
        Ok(())
    }
}
