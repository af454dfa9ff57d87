mod common;

use common::{create_group, create_user, identity_of, setup_app};
use lodgekeep_backend::errors::internal::{AccessError, AuthError};
use lodgekeep_backend::errors::InternalError;
use lodgekeep_backend::stores::user_store::AdminUserUpdate;
use lodgekeep_backend::types::db::user;
use lodgekeep_backend::AppData;

async fn create_web_admin(app: &AppData, username: &str) -> user::Model {
    let user = create_user(app, username).await;
    app.user_store
        .apply_admin_update(
            &user.id,
            AdminUserUpdate {
                is_web_admin: Some(true),
                ..AdminUserUpdate::default()
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_web_admin_cannot_deactivate_self() {
    let app = setup_app().await;
    let admin = create_web_admin(&app, "siteadmin").await;

    let result = app
        .admin_service
        .update_user(
            &identity_of(&admin),
            &admin.id,
            AdminUserUpdate {
                is_active: Some(false),
                ..AdminUserUpdate::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::SelfModificationDenied))
    ));
}

#[tokio::test]
async fn test_web_admin_cannot_strip_own_flag() {
    let app = setup_app().await;
    let admin = create_web_admin(&app, "siteadmin").await;

    let result = app
        .admin_service
        .update_user(
            &identity_of(&admin),
            &admin.id,
            AdminUserUpdate {
                is_web_admin: Some(false),
                ..AdminUserUpdate::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::SelfModificationDenied))
    ));
}

#[tokio::test]
async fn test_web_admin_cannot_delete_self() {
    let app = setup_app().await;
    let admin = create_web_admin(&app, "siteadmin").await;

    let result = app
        .admin_service
        .delete_user(&identity_of(&admin), &admin.id)
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::SelfModificationDenied))
    ));
}

#[tokio::test]
async fn test_web_admin_can_deactivate_others() {
    let app = setup_app().await;
    let admin = create_web_admin(&app, "siteadmin").await;
    let target = create_user(&app, "regularuser").await;

    let updated = app
        .admin_service
        .update_user(
            &identity_of(&admin),
            &target.id,
            AdminUserUpdate {
                is_active: Some(false),
                ..AdminUserUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);
}

#[tokio::test]
async fn test_non_web_admin_is_denied() {
    let app = setup_app().await;
    let user = create_user(&app, "regularuser").await;

    let result = app.admin_service.list_users(&identity_of(&user)).await;
    assert!(matches!(
        result,
        Err(InternalError::Access(AccessError::InsufficientRole))
    ));
}

#[tokio::test]
async fn test_delete_user_cascades_owned_groups() {
    let app = setup_app().await;
    let admin = create_web_admin(&app, "siteadmin").await;
    let target = create_user(&app, "groupowner").await;
    let group = create_group(&app, &target, "Doomed group").await;

    app.admin_service
        .delete_user(&identity_of(&admin), &target.id)
        .await
        .unwrap();

    assert!(app.user_store.find_by_id(&target.id).await.unwrap().is_none());
    assert!(app.group_store.find_group(&group.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_rejects_deactivated_account() {
    let app = setup_app().await;
    let admin = create_web_admin(&app, "siteadmin").await;
    let target = create_user(&app, "lockeduser").await;

    let token = app.token_service.issue(&target).unwrap();

    // works while active
    let identity = app.identity_service.resolve(&token).await.unwrap();
    assert_eq!(identity.user_id, target.id);

    app.admin_service
        .update_user(
            &identity_of(&admin),
            &target.id,
            AdminUserUpdate {
                is_active: Some(false),
                ..AdminUserUpdate::default()
            },
        )
        .await
        .unwrap();

    let result = app.identity_service.resolve(&token).await;
    assert!(matches!(
        result,
        Err(InternalError::Auth(AuthError::AccountDeactivated))
    ));
}

#[tokio::test]
async fn test_resolve_rejects_invalid_token() {
    let app = setup_app().await;

    let result = app.identity_service.resolve("garbage-token").await;
    assert!(matches!(
        result,
        Err(InternalError::Auth(AuthError::Unauthenticated))
    ));
}

#[tokio::test]
async fn test_login_flow_resolves_identity() {
    let app = setup_app().await;
    let user = create_user(&app, "loginuser").await;

    let verified = app
        .user_store
        .verify_credentials("loginuser", "correct-horse-battery")
        .await
        .unwrap();
    assert_eq!(verified.id, user.id);

    let token = app.token_service.issue(&verified).unwrap();
    let identity = app.identity_service.resolve(&token).await.unwrap();
    assert_eq!(identity.username, "loginuser");

    let wrong = app
        .user_store
        .verify_credentials("loginuser", "wrong-password")
        .await;
    assert!(matches!(
        wrong,
        Err(InternalError::Auth(AuthError::InvalidCredentials))
    ));
}
