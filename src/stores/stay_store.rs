use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::LookupError;
use crate::errors::InternalError;
use crate::types::db::stay;

#[derive(Debug, Clone)]
pub struct NewStay {
    pub property_id: String,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i32,
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StayUpdate {
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i32,
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

/// StayStore manages bookings. Conflict lookups and the writes they gate
/// take a generic connection so both can run inside one transaction.
pub struct StayStore {
    db: DatabaseConnection,
}

impl StayStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// True when any non-cancelled, non-completed stay on the property
    /// overlaps [check_in, check_out].
    ///
    /// The boundary is intentionally inclusive: a stay checking out on the
    /// same day another checks in counts as a conflict (turnover-day
    /// blocking), so the predicate is
    /// `check_in <= other.check_out && check_out >= other.check_in`.
    pub async fn has_conflicting<C: ConnectionTrait>(
        &self,
        conn: &C,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_stay_id: Option<&str>,
    ) -> Result<bool, InternalError> {
        let mut query = stay::Entity::find()
            .filter(stay::Column::PropertyId.eq(property_id))
            .filter(stay::Column::CheckIn.lte(check_out))
            .filter(stay::Column::CheckOut.gte(check_in))
            .filter(
                stay::Column::Status.is_not_in([stay::STATUS_CANCELLED, stay::STATUS_COMPLETED]),
            );

        if let Some(exclude) = exclude_stay_id {
            query = query.filter(stay::Column::StayId.ne(exclude));
        }

        let conflicts = query
            .count(conn)
            .await
            .map_err(|e| InternalError::database("has_conflicting", e))?;
        Ok(conflicts > 0)
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        created_by: &str,
        data: NewStay,
    ) -> Result<stay::Model, InternalError> {
        let now = Utc::now().timestamp();
        let new_stay = stay::ActiveModel {
            stay_id: Set(Uuid::new_v4().to_string()),
            property_id: Set(data.property_id),
            guest_id: Set(data.guest_id),
            check_in: Set(data.check_in),
            check_out: Set(data.check_out),
            total_price: Set(data.total_price),
            status: Set(stay::STATUS_UPCOMING.to_string()),
            payment_status: Set("pending".to_string()),
            number_of_guests: Set(data.number_of_guests),
            special_requests: Set(data.special_requests),
            created_by: Set(created_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        new_stay
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_stay", e))
    }

    pub async fn find(&self, stay_id: &str) -> Result<Option<stay::Model>, InternalError> {
        stay::Entity::find_by_id(stay_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_stay", e))
    }

    pub async fn get(&self, stay_id: &str) -> Result<stay::Model, InternalError> {
        self.find(stay_id)
            .await?
            .ok_or_else(|| LookupError::Stay(stay_id.to_string()).into())
    }

    pub async fn apply_update<C: ConnectionTrait>(
        &self,
        conn: &C,
        current: stay::Model,
        data: StayUpdate,
    ) -> Result<stay::Model, InternalError> {
        let mut active: stay::ActiveModel = current.into();
        active.guest_id = Set(data.guest_id);
        active.check_in = Set(data.check_in);
        active.check_out = Set(data.check_out);
        active.total_price = Set(data.total_price);
        active.number_of_guests = Set(data.number_of_guests);
        active.special_requests = Set(data.special_requests);
        if let Some(status) = data.status {
            active.status = Set(status);
        }
        if let Some(payment_status) = data.payment_status {
            active.payment_status = Set(payment_status);
        }
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("apply_update", e))
    }

    pub async fn set_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        stay_id: &str,
        status: &str,
    ) -> Result<stay::Model, InternalError> {
        let stay = stay::Entity::find_by_id(stay_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("set_status", e))?
            .ok_or_else(|| LookupError::Stay(stay_id.to_string()))?;
        let mut active: stay::ActiveModel = stay.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_status", e))
    }

    /// Stays still occupying the property's calendar as "active"
    pub async fn count_active<C: ConnectionTrait>(
        &self,
        conn: &C,
        property_id: &str,
    ) -> Result<u64, InternalError> {
        stay::Entity::find()
            .filter(stay::Column::PropertyId.eq(property_id))
            .filter(stay::Column::Status.eq(stay::STATUS_ACTIVE))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_active", e))
    }

    pub async fn list_by_property(
        &self,
        property_id: &str,
        status: Option<&str>,
    ) -> Result<Vec<stay::Model>, InternalError> {
        let mut query = stay::Entity::find()
            .filter(stay::Column::PropertyId.eq(property_id))
            .order_by_desc(stay::Column::CheckIn);
        if let Some(status) = status {
            query = query.filter(stay::Column::Status.eq(status));
        }
        query
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_by_property", e))
    }

    /// All stays across a set of properties, check-in ascending (analytics)
    pub async fn list_for_properties(
        &self,
        property_ids: &[String],
    ) -> Result<Vec<stay::Model>, InternalError> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        stay::Entity::find()
            .filter(stay::Column::PropertyId.is_in(property_ids.iter().cloned()))
            .order_by_asc(stay::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_for_properties", e))
    }

    pub async fn delete(&self, stay_id: &str) -> Result<(), InternalError> {
        stay::Entity::delete_by_id(stay_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_stay", e))?;
        Ok(())
    }
}
