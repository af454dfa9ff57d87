mod common;

use chrono::Utc;
use common::{create_group, create_property, create_user, identity_of, setup_app};
use lodgekeep_backend::errors::internal::QuotaError;
use lodgekeep_backend::errors::InternalError;

#[tokio::test]
async fn test_free_user_can_create_first_group_only() {
    let app = setup_app().await;
    let user = create_user(&app, "freeuser").await;

    assert!(app.quota_service.can_create_group(&user.id).await.unwrap());

    create_group(&app, &user, "First group").await;

    assert!(!app.quota_service.can_create_group(&user.id).await.unwrap());

    let result = app
        .group_service
        .create_group(&identity_of(&user), "Second group".to_string())
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Quota(QuotaError::GroupLimitReached))
    ));
}

#[tokio::test]
async fn test_premium_lifts_group_quota() {
    let app = setup_app().await;
    let user = create_user(&app, "payinguser").await;
    create_group(&app, &user, "First group").await;

    app.user_store.set_premium(&user.id, None).await.unwrap();

    assert!(app.quota_service.can_create_group(&user.id).await.unwrap());
    app.group_service
        .create_group(&identity_of(&user), "Second group".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_free_user_property_quota_is_global() {
    let app = setup_app().await;
    let user = create_user(&app, "freeuser").await;
    let group = create_group(&app, &user, "First group").await;

    assert!(app.quota_service.can_create_property(&user.id).await.unwrap());
    create_property(&app, &user, &group.id).await;

    // the limit counts properties created anywhere, not per group
    assert!(!app.quota_service.can_create_property(&user.id).await.unwrap());
}

#[tokio::test]
async fn test_expired_premium_is_demoted_on_read() {
    let app = setup_app().await;
    let user = create_user(&app, "lapseduser").await;

    let yesterday = Utc::now().timestamp() - 24 * 60 * 60;
    app.user_store
        .set_premium(&user.id, Some(yesterday))
        .await
        .unwrap();

    // the read applies the expiry and persists the demotion
    let current = app.quota_service.current_user(&user.id).await.unwrap();
    assert!(!current.is_premium);
    assert_eq!(current.premium_ends_at, None);

    let stored = app.user_store.get_by_id(&user.id).await.unwrap();
    assert!(!stored.is_premium);
    assert_eq!(stored.premium_ends_at, None);
}

#[tokio::test]
async fn test_unexpired_premium_survives_read() {
    let app = setup_app().await;
    let user = create_user(&app, "activepremium").await;

    let tomorrow = Utc::now().timestamp() + 24 * 60 * 60;
    app.user_store
        .set_premium(&user.id, Some(tomorrow))
        .await
        .unwrap();

    let current = app.quota_service.current_user(&user.id).await.unwrap();
    assert!(current.is_premium);

    assert!(app.quota_service.can_create_group(&user.id).await.unwrap());
}

#[tokio::test]
async fn test_expired_premium_reverts_to_free_tier_quota() {
    let app = setup_app().await;
    let user = create_user(&app, "lapseduser").await;
    create_group(&app, &user, "First group").await;

    let yesterday = Utc::now().timestamp() - 24 * 60 * 60;
    app.user_store
        .set_premium(&user.id, Some(yesterday))
        .await
        .unwrap();

    // expired premium counts as free tier for this decision
    assert!(!app.quota_service.can_create_group(&user.id).await.unwrap());
}
