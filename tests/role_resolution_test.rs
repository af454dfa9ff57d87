mod common;

use common::{create_group, create_user, setup_app};
use lodgekeep_backend::errors::internal::LookupError;
use lodgekeep_backend::errors::InternalError;
use lodgekeep_backend::types::internal::GroupRole;

#[tokio::test]
async fn test_owner_resolves_to_owner() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    let role = app.role_service.role_of(&group.id, &owner.id).await.unwrap();
    assert_eq!(role, GroupRole::Owner);
}

#[tokio::test]
async fn test_owner_short_circuit_ignores_drifted_role_row() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    // a role row for the owner can only exist as data drift; the resolver
    // must ignore it
    app.group_store
        .upsert_role(&group.id, &owner.id, "member")
        .await
        .unwrap();

    let role = app.role_service.role_of(&group.id, &owner.id).await.unwrap();
    assert_eq!(role, GroupRole::Owner);
}

#[tokio::test]
async fn test_member_without_role_row_defaults_to_member() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let member = create_user(&app, "plainmember").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    app.group_store.add_member(&group.id, &member.id).await.unwrap();

    let role = app.role_service.role_of(&group.id, &member.id).await.unwrap();
    assert_eq!(role, GroupRole::Member);
}

#[tokio::test]
async fn test_explicit_role_row_wins_over_membership_default() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let cleaner = create_user(&app, "cleaner").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    app.group_store.add_member(&group.id, &cleaner.id).await.unwrap();
    app.group_store
        .upsert_role(&group.id, &cleaner.id, "cleaner")
        .await
        .unwrap();

    let role = app.role_service.role_of(&group.id, &cleaner.id).await.unwrap();
    assert_eq!(role, GroupRole::Cleaner);
}

#[tokio::test]
async fn test_non_member_resolves_to_none() {
    let app = setup_app().await;
    let owner = create_user(&app, "owner").await;
    let stranger = create_user(&app, "stranger").await;
    let group = create_group(&app, &owner, "Holiday homes").await;

    let role = app.role_service.role_of(&group.id, &stranger.id).await.unwrap();
    assert_eq!(role, GroupRole::None);
}

#[tokio::test]
async fn test_missing_group_fails_with_group_not_found() {
    let app = setup_app().await;
    let user = create_user(&app, "someone").await;

    let result = app.role_service.role_of("no-such-group", &user.id).await;
    assert!(matches!(
        result,
        Err(InternalError::Lookup(LookupError::Group(_)))
    ));
}
