use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::providers::{EventSink, TracingEventSink};
use crate::services::{
    AdminService, BookingService, CleaningService, GroupService, GuestService, IdentityService,
    PropertyService, QuotaService, RoleService, TokenService,
};
use crate::stores::{
    CleaningStore, GroupStore, GuestStore, PropertyStore, StayStore, UserStore,
};

/// Centralized application data following the main-owned stores pattern.
///
/// All stores and services are created once here and shared across API
/// surfaces; nothing else constructs a store, so every access decision goes
/// through the same role resolver and policy engine.
pub struct AppData {
    pub db: DatabaseConnection,

    pub user_store: Arc<UserStore>,
    pub group_store: Arc<GroupStore>,
    pub property_store: Arc<PropertyStore>,
    pub guest_store: Arc<GuestStore>,
    pub stay_store: Arc<StayStore>,
    pub cleaning_store: Arc<CleaningStore>,

    pub token_service: Arc<TokenService>,
    pub identity_service: Arc<IdentityService>,
    pub role_service: Arc<RoleService>,
    pub quota_service: Arc<QuotaService>,
    pub group_service: Arc<GroupService>,
    pub property_service: Arc<PropertyService>,
    pub guest_service: Arc<GuestService>,
    pub booking_service: Arc<BookingService>,
    pub cleaning_service: Arc<CleaningService>,
    pub admin_service: Arc<AdminService>,
}

impl AppData {
    /// Wire up all stores and services. The database must already be
    /// migrated.
    pub fn init(db: DatabaseConnection, jwt_secret: String) -> Self {
        tracing::info!("Initializing AppData...");

        let event_sink: Arc<dyn EventSink> = Arc::new(TracingEventSink);

        let user_store = Arc::new(UserStore::new(db.clone()));
        let group_store = Arc::new(GroupStore::new(db.clone()));
        let property_store = Arc::new(PropertyStore::new(db.clone()));
        let guest_store = Arc::new(GuestStore::new(db.clone()));
        let stay_store = Arc::new(StayStore::new(db.clone()));
        let cleaning_store = Arc::new(CleaningStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(jwt_secret));
        let identity_service = Arc::new(IdentityService::new(
            user_store.clone(),
            token_service.clone(),
        ));
        let role_service = Arc::new(RoleService::new(
            group_store.clone(),
            property_store.clone(),
        ));
        let quota_service = Arc::new(QuotaService::new(
            user_store.clone(),
            group_store.clone(),
            property_store.clone(),
        ));
        let group_service = Arc::new(GroupService::new(
            group_store.clone(),
            user_store.clone(),
            role_service.clone(),
            quota_service.clone(),
        ));
        let property_service = Arc::new(PropertyService::new(
            property_store.clone(),
            group_store.clone(),
            role_service.clone(),
            quota_service.clone(),
        ));
        let guest_service = Arc::new(GuestService::new(
            guest_store.clone(),
            role_service.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            stay_store.clone(),
            property_store.clone(),
            guest_store.clone(),
            group_store.clone(),
            role_service.clone(),
            event_sink.clone(),
        ));
        let cleaning_service = Arc::new(CleaningService::new(
            cleaning_store.clone(),
            property_store.clone(),
            user_store.clone(),
            role_service.clone(),
            event_sink,
        ));
        let admin_service = Arc::new(AdminService::new(user_store.clone()));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            user_store,
            group_store,
            property_store,
            guest_store,
            stay_store,
            cleaning_store,
            token_service,
            identity_service,
            role_service,
            quota_service,
            group_service,
            property_service,
            guest_service,
            booking_service,
            cleaning_service,
            admin_service,
        }
    }
}
