use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::sync::Arc;

use lodgekeep_backend::stores::guest_store::GuestDetails;
use lodgekeep_backend::stores::property_store::NewProperty;
use lodgekeep_backend::types::db::{group, guest, property, user};
use lodgekeep_backend::types::internal::Identity;
use lodgekeep_backend::AppData;

/// Create an in-memory database, run migrations, and wire up AppData
pub async fn setup_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(AppData::init(
        db,
        "test-secret-key-minimum-32-characters-long".to_string(),
    ))
}

pub async fn create_user(app: &AppData, username: &str) -> user::Model {
    app.user_store
        .add_user(
            username.to_string(),
            format!("{}@example.com", username),
            "correct-horse-battery".to_string(),
        )
        .await
        .expect("Failed to create user")
}

pub fn identity_of(user: &user::Model) -> Identity {
    Identity {
        user_id: user.id.clone(),
        username: user.username.clone(),
        is_active: user.is_active,
        is_admin: user.is_admin,
        is_web_admin: user.is_web_admin,
        role_id: user.role_id,
    }
}

pub async fn create_group(app: &AppData, owner: &user::Model, name: &str) -> group::Model {
    app.group_service
        .create_group(&identity_of(owner), name.to_string())
        .await
        .expect("Failed to create group")
}

pub async fn create_property(
    app: &AppData,
    owner: &user::Model,
    group_id: &str,
) -> property::Model {
    app.property_service
        .create_property(
            &identity_of(owner),
            group_id,
            NewProperty {
                name: "Seaside flat".to_string(),
                address: "1 Harbour Road".to_string(),
                price_per_day: 120,
                size: 55,
                rooms: 2,
                loan: 0,
                property_buy_price: 200_000,
                property_sell_price_now: 220_000,
            },
        )
        .await
        .expect("Failed to create property")
}

pub async fn create_guest(app: &AppData, owner: &user::Model, group_id: &str) -> guest::Model {
    app.guest_service
        .create_guest(
            &identity_of(owner),
            group_id,
            GuestDetails {
                first_name: "Alex".to_string(),
                last_name: "Larsen".to_string(),
                email: Some("alex@example.com".to_string()),
                ..GuestDetails::default()
            },
        )
        .await
        .expect("Failed to create guest")
}
