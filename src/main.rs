mod api;
mod app_data;
mod config;
mod errors;
mod providers;
mod services;
mod stores;
mod types;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{
    ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set,
};

use api::{
    AdminApi, AuthApi, CleaningApi, GroupApi, GuestApi, HealthApi, ListingApi, PropertyApi,
    StayApi, UserApi,
};
use app_data::AppData;
use config::AppConfig;
use migration::{Migrator, MigratorTrait};
use types::db::role;

/// Seed the default site role every fresh account references (role_id 0).
/// Tier 101 lets ordinary accounts manage the members of groups they own.
async fn seed_default_role(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let existing = role::Entity::find_by_id(0).one(db).await?;
    if existing.is_none() {
        let standard = role::ActiveModel {
            id: Set(0),
            name: Set("standard".to_string()),
            permissions_id: Set(101),
        };
        standard.insert(db).await?;
        tracing::info!("seeded default site role");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let app_config = AppConfig::from_env();

    let db: DatabaseConnection = Database::connect(&app_config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database: {}", app_config.database_url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    seed_default_role(&db)
        .await
        .expect("Failed to seed default site role");

    let app_data = AppData::init(db, app_config.jwt_secret.clone());

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(
                app_data.user_store.clone(),
                app_data.token_service.clone(),
                app_data.identity_service.clone(),
            ),
            UserApi::new(
                app_data.user_store.clone(),
                app_data.identity_service.clone(),
                app_data.quota_service.clone(),
            ),
            AdminApi::new(
                app_data.admin_service.clone(),
                app_data.identity_service.clone(),
            ),
            GroupApi::new(
                app_data.group_service.clone(),
                app_data.identity_service.clone(),
            ),
            PropertyApi::new(
                app_data.property_service.clone(),
                app_data.identity_service.clone(),
            ),
            ListingApi::new(app_data.property_service.clone()),
            StayApi::new(
                app_data.booking_service.clone(),
                app_data.identity_service.clone(),
            ),
            GuestApi::new(
                app_data.guest_service.clone(),
                app_data.identity_service.clone(),
            ),
            CleaningApi::new(
                app_data.cleaning_service.clone(),
                app_data.identity_service.clone(),
            ),
        ),
        "Lodgekeep API",
        "1.0.0",
    )
    .server(format!("http://{}/api", app_config.bind_addr));

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", app_config.bind_addr);
    Server::new(TcpListener::bind(app_config.bind_addr))
        .run(app)
        .await
}
