mod common;

use chrono::NaiveDate;
use common::{create_group, create_guest, create_property, create_user, identity_of, setup_app};
use lodgekeep_backend::errors::internal::BookingError;
use lodgekeep_backend::errors::InternalError;
use lodgekeep_backend::stores::stay_store::{NewStay, StayUpdate};
use lodgekeep_backend::types::db::{property, user};
use lodgekeep_backend::AppData;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Owner + group + property + guest, plus one stay 2024-06-01 -> 2024-06-05
async fn setup_booked_property() -> (Arc<AppData>, user::Model, property::Model, String) {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let property = create_property(&app, &owner, &group.id).await;
    let guest = create_guest(&app, &owner, &group.id).await;

    let stay = app
        .booking_service
        .create_stay(
            &identity_of(&owner),
            NewStay {
                property_id: property.property_id.clone(),
                guest_id: guest.guest_id.clone(),
                check_in: date(2024, 6, 1),
                check_out: date(2024, 6, 5),
                total_price: 480,
                number_of_guests: 2,
                special_requests: None,
            },
        )
        .await
        .expect("Failed to create stay");

    (app, owner, property, stay.stay_id)
}

#[tokio::test]
async fn test_overlapping_range_conflicts() {
    let (app, _, property, _) = setup_booked_property().await;

    let conflict = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 3), date(2024, 6, 8), None)
        .await
        .unwrap();
    assert!(conflict);
}

#[tokio::test]
async fn test_back_to_back_checkin_on_checkout_day_conflicts() {
    // turnover-day blocking: checkout day == next check-in day is a conflict
    let (app, _, property, _) = setup_booked_property().await;

    let conflict = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 5), date(2024, 6, 10), None)
        .await
        .unwrap();
    assert!(conflict);
}

#[tokio::test]
async fn test_day_after_checkout_does_not_conflict() {
    let (app, _, property, _) = setup_booked_property().await;

    let conflict = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 6), date(2024, 6, 10), None)
        .await
        .unwrap();
    assert!(!conflict);
}

#[tokio::test]
async fn test_has_conflict_is_idempotent() {
    let (app, _, property, _) = setup_booked_property().await;

    let first = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 3), date(2024, 6, 8), None)
        .await
        .unwrap();
    let second = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 3), date(2024, 6, 8), None)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cancelled_stay_never_blocks() {
    let (app, owner, property, stay_id) = setup_booked_property().await;

    app.booking_service
        .cancel_stay(&identity_of(&owner), &stay_id)
        .await
        .unwrap();

    let conflict = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 1), date(2024, 6, 10), None)
        .await
        .unwrap();
    assert!(!conflict);
}

#[tokio::test]
async fn test_exclude_stay_id_skips_self() {
    let (app, _, property, stay_id) = setup_booked_property().await;

    let conflict = app
        .booking_service
        .has_conflict(
            &property.property_id,
            date(2024, 6, 1),
            date(2024, 6, 5),
            Some(&stay_id),
        )
        .await
        .unwrap();
    assert!(!conflict);
}

#[tokio::test]
async fn test_invalid_date_range_is_rejected() {
    let (app, _, property, _) = setup_booked_property().await;

    let result = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 10), date(2024, 6, 5), None)
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Booking(BookingError::InvalidDateRange))
    ));

    // equal dates are invalid too
    let result = app
        .booking_service
        .has_conflict(&property.property_id, date(2024, 6, 5), date(2024, 6, 5), None)
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Booking(BookingError::InvalidDateRange))
    ));
}

#[tokio::test]
async fn test_create_stay_refuses_overlap() {
    let (app, owner, property, _) = setup_booked_property().await;
    let guest = create_guest(&app, &owner, &property.group_id).await;

    let result = app
        .booking_service
        .create_stay(
            &identity_of(&owner),
            NewStay {
                property_id: property.property_id.clone(),
                guest_id: guest.guest_id,
                check_in: date(2024, 6, 4),
                check_out: date(2024, 6, 8),
                total_price: 400,
                number_of_guests: 1,
                special_requests: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Booking(BookingError::Conflict))
    ));
}

#[tokio::test]
async fn test_create_stay_marks_property_rented() {
    let (app, _, property, _) = setup_booked_property().await;

    let stored = app.property_store.get(&property.property_id).await.unwrap();
    assert!(stored.is_rented);
}

#[tokio::test]
async fn test_update_stay_does_not_conflict_with_itself() {
    let (app, owner, property, stay_id) = setup_booked_property().await;
    let stay = app.stay_store.get(&stay_id).await.unwrap();

    // same range, updated price; the stay must not collide with itself
    let updated = app
        .booking_service
        .update_stay(
            &identity_of(&owner),
            &stay_id,
            StayUpdate {
                guest_id: stay.guest_id,
                check_in: date(2024, 6, 1),
                check_out: date(2024, 6, 5),
                total_price: 520,
                number_of_guests: 2,
                special_requests: None,
                status: None,
                payment_status: Some("paid".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_price, 520);
    assert_eq!(updated.payment_status, "paid");
}

#[tokio::test]
async fn test_only_cancelled_stays_can_be_deleted() {
    let (app, owner, _, stay_id) = setup_booked_property().await;
    let owner_identity = identity_of(&owner);

    let result = app.booking_service.delete_stay(&owner_identity, &stay_id).await;
    assert!(matches!(
        result,
        Err(InternalError::Booking(BookingError::NotCancelled))
    ));

    app.booking_service
        .cancel_stay(&owner_identity, &stay_id)
        .await
        .unwrap();
    app.booking_service
        .delete_stay(&owner_identity, &stay_id)
        .await
        .unwrap();

    assert!(app.stay_store.find(&stay_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_closing_last_active_stay_frees_property() {
    let (app, owner, property, stay_id) = setup_booked_property().await;

    app.booking_service
        .complete_stay(&identity_of(&owner), &stay_id)
        .await
        .unwrap();

    let stored = app.property_store.get(&property.property_id).await.unwrap();
    assert!(!stored.is_rented);
}

#[tokio::test]
async fn test_member_cannot_create_stay() {
    let (app, owner, property, _) = setup_booked_property().await;
    let member = create_user(&app, "plainmember").await;
    app.group_store
        .add_member(&property.group_id, &member.id)
        .await
        .unwrap();
    let guest = create_guest(&app, &owner, &property.group_id).await;

    let result = app
        .booking_service
        .create_stay(
            &identity_of(&member),
            NewStay {
                property_id: property.property_id.clone(),
                guest_id: guest.guest_id,
                check_in: date(2024, 7, 1),
                check_out: date(2024, 7, 5),
                total_price: 480,
                number_of_guests: 2,
                special_requests: None,
            },
        )
        .await;
    assert!(matches!(result, Err(InternalError::Access(_))));
}
