use std::env;

/// Application settings loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics when JWT_SECRET is unset; the server must not start without a
    /// signing key.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://lodgekeep.db?mode=rwc".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").expect("JWT_SECRET environment variable must be set");

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            jwt_secret,
            bind_addr,
        }
    }
}
