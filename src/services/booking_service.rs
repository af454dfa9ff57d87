use chrono::NaiveDate;
use sea_orm::TransactionTrait;
use std::sync::Arc;

use crate::errors::internal::BookingError;
use crate::errors::InternalError;
use crate::providers::EventSink;
use crate::services::policy::{authorize, Action, PolicyContext};
use crate::services::RoleService;
use crate::stores::stay_store::{NewStay, StayUpdate};
use crate::stores::{GroupStore, GuestStore, PropertyStore, StayStore};
use crate::types::db::stay;
use crate::types::internal::{ChangeEvent, EventAction, Identity};

const STAY_EVENT: &str = "STAY_UPDATE";

/// Booking workflows around the conflict detector.
///
/// The conflict check and the insert/update it gates always run inside one
/// transaction; two concurrent bookings for overlapping dates cannot both
/// pass the check and commit.
pub struct BookingService {
    stay_store: Arc<StayStore>,
    property_store: Arc<PropertyStore>,
    guest_store: Arc<GuestStore>,
    group_store: Arc<GroupStore>,
    role_service: Arc<RoleService>,
    events: Arc<dyn EventSink>,
}

impl BookingService {
    pub fn new(
        stay_store: Arc<StayStore>,
        property_store: Arc<PropertyStore>,
        guest_store: Arc<GuestStore>,
        group_store: Arc<GroupStore>,
        role_service: Arc<RoleService>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            stay_store,
            property_store,
            guest_store,
            group_store,
            role_service,
            events,
        }
    }

    /// Whether any active booking on the property overlaps the candidate
    /// range. Boundary-adjacent stays conflict: the checkout day doubles as
    /// turnover day and blocks the next check-in.
    pub async fn has_conflict(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_stay_id: Option<&str>,
    ) -> Result<bool, InternalError> {
        validate_range(check_in, check_out)?;
        self.stay_store
            .has_conflicting(self.stay_store.db(), property_id, check_in, check_out, exclude_stay_id)
            .await
    }

    pub async fn create_stay(
        &self,
        actor: &Identity,
        data: NewStay,
    ) -> Result<stay::Model, InternalError> {
        let (property, role) = self
            .role_service
            .role_for_property(&data.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageStay, role, &PolicyContext::default())?;

        validate_range(data.check_in, data.check_out)?;
        self.guest_store.get(&data.guest_id).await?;

        let txn = self
            .stay_store
            .db()
            .begin()
            .await
            .map_err(|e| InternalError::transaction("create_stay", e))?;

        let conflict = self
            .stay_store
            .has_conflicting(&txn, &data.property_id, data.check_in, data.check_out, None)
            .await?;
        if conflict {
            txn.rollback()
                .await
                .map_err(|e| InternalError::transaction("create_stay", e))?;
            tracing::info!(property_id = %property.property_id, "booking conflict");
            return Err(BookingError::Conflict.into());
        }

        let created = self.stay_store.insert(&txn, &actor.user_id, data).await?;
        self.property_store
            .set_rented(&txn, &created.property_id, true)
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("create_stay", e))?;

        self.emit(EventAction::Create, &created);
        Ok(created)
    }

    pub async fn update_stay(
        &self,
        actor: &Identity,
        stay_id: &str,
        data: StayUpdate,
    ) -> Result<stay::Model, InternalError> {
        let current = self.stay_store.get(stay_id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&current.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageStay, role, &PolicyContext::default())?;

        validate_range(data.check_in, data.check_out)?;
        validate_statuses(&data)?;
        self.guest_store.get(&data.guest_id).await?;

        let txn = self
            .stay_store
            .db()
            .begin()
            .await
            .map_err(|e| InternalError::transaction("update_stay", e))?;

        // A cancelling update frees the calendar, so it skips the conflict
        // check; everything else must not collide with other stays.
        let cancelling = data.status.as_deref() == Some(stay::STATUS_CANCELLED);
        if !cancelling {
            let conflict = self
                .stay_store
                .has_conflicting(
                    &txn,
                    &current.property_id,
                    data.check_in,
                    data.check_out,
                    Some(stay_id),
                )
                .await?;
            if conflict {
                txn.rollback()
                    .await
                    .map_err(|e| InternalError::transaction("update_stay", e))?;
                return Err(BookingError::Conflict.into());
            }
        }

        let updated = self.stay_store.apply_update(&txn, current, data).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("update_stay", e))?;

        self.emit(EventAction::Update, &updated);
        Ok(updated)
    }

    pub async fn cancel_stay(
        &self,
        actor: &Identity,
        stay_id: &str,
    ) -> Result<stay::Model, InternalError> {
        self.close_stay(actor, stay_id, stay::STATUS_CANCELLED).await
    }

    pub async fn complete_stay(
        &self,
        actor: &Identity,
        stay_id: &str,
    ) -> Result<stay::Model, InternalError> {
        self.close_stay(actor, stay_id, stay::STATUS_COMPLETED).await
    }

    /// Shared cancel/complete path: set the status, then recompute the
    /// property's rented flag from the stays still active.
    async fn close_stay(
        &self,
        actor: &Identity,
        stay_id: &str,
        status: &str,
    ) -> Result<stay::Model, InternalError> {
        let current = self.stay_store.get(stay_id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&current.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageStay, role, &PolicyContext::default())?;

        let txn = self
            .stay_store
            .db()
            .begin()
            .await
            .map_err(|e| InternalError::transaction("close_stay", e))?;

        let updated = self.stay_store.set_status(&txn, stay_id, status).await?;

        let active = self
            .stay_store
            .count_active(&txn, &updated.property_id)
            .await?;
        if active == 0 {
            self.property_store
                .set_rented(&txn, &updated.property_id, false)
                .await?;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("close_stay", e))?;

        self.emit(EventAction::Update, &updated);
        Ok(updated)
    }

    /// Only cancelled stays may be deleted; everything else stays on the
    /// books for history.
    pub async fn delete_stay(&self, actor: &Identity, stay_id: &str) -> Result<(), InternalError> {
        let current = self.stay_store.get(stay_id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&current.property_id, &actor.user_id)
            .await?;
        authorize(Action::ManageStay, role, &PolicyContext::default())?;

        if current.status != stay::STATUS_CANCELLED {
            return Err(BookingError::NotCancelled.into());
        }

        self.stay_store.delete(stay_id).await?;
        self.emit(EventAction::Delete, &current);
        Ok(())
    }

    pub async fn get_stay(
        &self,
        actor: &Identity,
        stay_id: &str,
    ) -> Result<stay::Model, InternalError> {
        let current = self.stay_store.get(stay_id).await?;
        let (_, role) = self
            .role_service
            .role_for_property(&current.property_id, &actor.user_id)
            .await?;
        authorize(Action::ViewGroup, role, &PolicyContext::default())?;
        Ok(current)
    }

    pub async fn list_property_stays(
        &self,
        actor: &Identity,
        property_id: &str,
        status: Option<&str>,
    ) -> Result<Vec<stay::Model>, InternalError> {
        let (_, role) = self
            .role_service
            .role_for_property(property_id, &actor.user_id)
            .await?;
        authorize(Action::ViewGroup, role, &PolicyContext::default())?;
        self.stay_store.list_by_property(property_id, status).await
    }

    /// All stays across the caller's groups, check-in ascending
    pub async fn analytics(&self, actor: &Identity) -> Result<Vec<stay::Model>, InternalError> {
        let group_ids = self.group_store.member_group_ids(&actor.user_id).await?;
        let properties = self.property_store.list_for_groups(&group_ids).await?;
        let property_ids: Vec<String> =
            properties.into_iter().map(|p| p.property_id).collect();
        self.stay_store.list_for_properties(&property_ids).await
    }

    fn emit(&self, action: EventAction, stay: &stay::Model) {
        let payload = serde_json::to_value(stay).unwrap_or_default();
        self.events.emit(ChangeEvent::new(
            STAY_EVENT,
            action,
            payload,
            stay.property_id.clone(),
        ));
    }
}

fn validate_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), InternalError> {
    if check_in >= check_out {
        return Err(BookingError::InvalidDateRange.into());
    }
    Ok(())
}

fn validate_statuses(data: &StayUpdate) -> Result<(), InternalError> {
    if let Some(status) = data.status.as_deref() {
        let known = [
            stay::STATUS_UPCOMING,
            stay::STATUS_ACTIVE,
            stay::STATUS_COMPLETED,
            stay::STATUS_CANCELLED,
        ];
        if !known.contains(&status) {
            return Err(InternalError::validation(
                "status",
                "must be one of upcoming, active, completed, cancelled",
            ));
        }
    }
    if let Some(payment) = data.payment_status.as_deref() {
        if !["pending", "partial", "paid"].contains(&payment) {
            return Err(InternalError::validation(
                "payment_status",
                "must be one of pending, partial, paid",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range_rejects_inverted_and_equal_dates() {
        let d1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();

        assert!(validate_range(d1, d2).is_ok());
        assert!(matches!(
            validate_range(d2, d1),
            Err(InternalError::Booking(BookingError::InvalidDateRange))
        ));
        assert!(matches!(
            validate_range(d1, d1),
            Err(InternalError::Booking(BookingError::InvalidDateRange))
        ));
    }
}
