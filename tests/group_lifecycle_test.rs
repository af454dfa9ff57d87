mod common;

use chrono::NaiveDate;
use common::{
    create_group, create_guest, create_property, create_user, identity_of, setup_app,
};
use lodgekeep_backend::errors::internal::{AccessError, GroupError};
use lodgekeep_backend::errors::InternalError;
use lodgekeep_backend::services::group_service::LeaveOutcome;
use lodgekeep_backend::stores::cleaning_store::NewCleaningNotification;
use lodgekeep_backend::stores::stay_store::NewStay;
use lodgekeep_backend::types::internal::GroupRole;

#[tokio::test]
async fn test_add_member_then_duplicate_is_rejected() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let member = create_user(&app, "newmember").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    app.group_service
        .add_member(&owner_identity, &group.id, "newmember")
        .await
        .unwrap();

    let result = app
        .group_service
        .add_member(&owner_identity, &group.id, "newmember")
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Group(GroupError::AlreadyMember(_)))
    ));

    let role = app.role_service.role_of(&group.id, &member.id).await.unwrap();
    assert_eq!(role, GroupRole::Member);
}

#[tokio::test]
async fn test_admin_cannot_add_members() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let admin = create_user(&app, "groupadmin").await;
    create_user(&app, "candidate").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    app.group_service
        .add_member(&owner_identity, &group.id, "groupadmin")
        .await
        .unwrap();
    app.group_service
        .update_member_role(&owner_identity, &group.id, &admin.id, "admin")
        .await
        .unwrap();

    let result = app
        .group_service
        .add_member(&identity_of(&admin), &group.id, "candidate")
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::InsufficientRole))
    ));
}

#[tokio::test]
async fn test_admin_cannot_remove_admin_but_owner_can() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let first_admin = create_user(&app, "firstadmin").await;
    let second_admin = create_user(&app, "secondadmin").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    for admin in [&first_admin, &second_admin] {
        app.group_service
            .add_member(&owner_identity, &group.id, &admin.username)
            .await
            .unwrap();
        app.group_service
            .update_member_role(&owner_identity, &group.id, &admin.id, "admin")
            .await
            .unwrap();
    }

    let result = app
        .group_service
        .remove_member(&identity_of(&first_admin), &group.id, &second_admin.id)
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::AdminCannotRemoveAdmin))
    ));

    app.group_service
        .remove_member(&owner_identity, &group.id, &second_admin.id)
        .await
        .unwrap();
    let role = app
        .role_service
        .role_of(&group.id, &second_admin.id)
        .await
        .unwrap();
    assert_eq!(role, GroupRole::None);
}

#[tokio::test]
async fn test_admin_can_remove_plain_member() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let admin = create_user(&app, "groupadmin").await;
    let member = create_user(&app, "plainmember").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    app.group_service
        .add_member(&owner_identity, &group.id, "groupadmin")
        .await
        .unwrap();
    app.group_service
        .update_member_role(&owner_identity, &group.id, &admin.id, "admin")
        .await
        .unwrap();
    app.group_service
        .add_member(&owner_identity, &group.id, "plainmember")
        .await
        .unwrap();

    app.group_service
        .remove_member(&identity_of(&admin), &group.id, &member.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_nobody_removes_the_owner() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let admin = create_user(&app, "groupadmin").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    app.group_service
        .add_member(&owner_identity, &group.id, "groupadmin")
        .await
        .unwrap();
    app.group_service
        .update_member_role(&owner_identity, &group.id, &admin.id, "admin")
        .await
        .unwrap();

    for actor in [&owner, &admin] {
        let result = app
            .group_service
            .remove_member(&identity_of(actor), &group.id, &owner.id)
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Access(AccessError::CannotModifyOwner))
        ));
    }

    let result = app
        .group_service
        .update_member_role(&owner_identity, &group.id, &owner.id, "member")
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::CannotModifyOwner))
    ));
}

#[tokio::test]
async fn test_list_members_reports_owner_role() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let cleaner = create_user(&app, "cleanerperson").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    app.group_service
        .add_member(&owner_identity, &group.id, "cleanerperson")
        .await
        .unwrap();
    app.group_service
        .update_member_role(&owner_identity, &group.id, &cleaner.id, "cleaner")
        .await
        .unwrap();

    let members = app
        .group_service
        .list_members(&owner_identity, &group.id)
        .await
        .unwrap();
    assert_eq!(members.len(), 2);

    let owner_entry = members.iter().find(|m| m.user_id == owner.id).unwrap();
    assert!(owner_entry.is_owner);
    assert_eq!(owner_entry.role, GroupRole::Owner);

    let cleaner_entry = members.iter().find(|m| m.user_id == cleaner.id).unwrap();
    assert_eq!(cleaner_entry.role, GroupRole::Cleaner);
}

#[tokio::test]
async fn test_member_leaves_group() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let member = create_user(&app, "plainmember").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    app.group_service
        .add_member(&identity_of(&owner), &group.id, "plainmember")
        .await
        .unwrap();

    let outcome = app
        .group_service
        .leave_group(&identity_of(&member), &group.id)
        .await
        .unwrap();
    assert_eq!(outcome, LeaveOutcome::Left);

    // group is still there, member is gone
    assert!(app.group_store.find_group(&group.id).await.unwrap().is_some());
    let role = app.role_service.role_of(&group.id, &member.id).await.unwrap();
    assert_eq!(role, GroupRole::None);
}

#[tokio::test]
async fn test_owner_leaving_deletes_the_group() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    let outcome = app
        .group_service
        .leave_group(&identity_of(&owner), &group.id)
        .await
        .unwrap();
    assert_eq!(outcome, LeaveOutcome::GroupDeleted);
    assert!(app.group_store.find_group(&group.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_group_cascades_all_dependents() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let cleaner = create_user(&app, "cleanerperson").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    let property = create_property(&app, &owner, &group.id).await;
    let guest = create_guest(&app, &owner, &group.id).await;

    let stay = app
        .booking_service
        .create_stay(
            &owner_identity,
            NewStay {
                property_id: property.property_id.clone(),
                guest_id: guest.guest_id.clone(),
                check_in: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
                total_price: 480,
                number_of_guests: 2,
                special_requests: None,
            },
        )
        .await
        .unwrap();

    let notification = app
        .cleaning_service
        .create_notification(
            &owner_identity,
            NewCleaningNotification {
                property_id: property.property_id.clone(),
                assigned_to: cleaner.id.clone(),
                stay_id: Some(stay.stay_id.clone()),
                scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
                notes: None,
            },
        )
        .await
        .unwrap();

    app.group_service
        .delete_group(&owner_identity, &group.id)
        .await
        .unwrap();

    assert!(app.group_store.find_group(&group.id).await.unwrap().is_none());
    assert!(app
        .property_store
        .find(&property.property_id)
        .await
        .unwrap()
        .is_none());
    assert!(app.guest_store.find(&guest.guest_id).await.unwrap().is_none());
    assert!(app.stay_store.find(&stay.stay_id).await.unwrap().is_none());
    assert!(app
        .cleaning_store
        .find(&notification.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_only_owner_deletes_group() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let admin = create_user(&app, "groupadmin").await;
    let group = create_group(&app, &owner, "Holiday homes").await;
    let owner_identity = identity_of(&owner);

    app.group_service
        .add_member(&owner_identity, &group.id, "groupadmin")
        .await
        .unwrap();
    app.group_service
        .update_member_role(&owner_identity, &group.id, &admin.id, "admin")
        .await
        .unwrap();

    let result = app
        .group_service
        .delete_group(&identity_of(&admin), &group.id)
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::InsufficientRole))
    ));
}

#[tokio::test]
async fn test_non_member_gets_not_a_member() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let stranger = create_user(&app, "stranger").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    let result = app
        .group_service
        .list_members(&identity_of(&stranger), &group.id)
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::NotAMember))
    ));
}
