//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the configuration, the injected store and the session keys.

use crate::session::SessionKeys;
use car_core::{BookingError, BookingStore, MemoryStore, ServiceCatalog, SharedStore};
use car_mongo::{MongoConfig, MongoStore};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
    /// HS256 secret for session tokens
    pub token_secret: String,
    /// Add `Secure` to the session cookie
    pub cookie_secure: bool,
    /// Seed file for the in-memory catalog
    pub catalog_path: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Defaults with an explicit secret; reads no environment
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origins: Vec::new(),
            token_secret: token_secret.into(),
            cookie_secure: false,
            catalog_path: "config/services.toml".to_string(),
            environment: "development".to_string(),
        }
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, BookingError> {
        dotenvy::dotenv().ok();

        let token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BookingError::Configuration("ACCESS_TOKEN_SECRET not set".to_string()))?;

        let defaults = Self::new(token_secret);

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            catalog_path: std::env::var("SERVICES_CATALOG").unwrap_or(defaults.catalog_path),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            token_secret: defaults.token_secret,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("token_secret", &"***")
            .field("cookie_secure", &self.cookie_secure)
            .field("catalog_path", &self.catalog_path)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Split a comma-separated origin list
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog and checkout storage
    pub store: SharedStore,
    /// Session token keys
    pub keys: SessionKeys,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Assemble state around an already-built store
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        let keys = SessionKeys::new(config.token_secret.as_bytes());
        Self {
            store,
            keys,
            config,
        }
    }

    /// Build config and store from the environment
    pub async fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let store = build_store(&config).await?;
        Ok(Self::new(config, store))
    }
}

/// MongoDB when `MONGO_URL` is set, otherwise the seeded in-memory store.
///
/// An unreachable database is logged, not fatal: routes stay registered
/// and answer 500 until it comes back.
async fn build_store(config: &AppConfig) -> anyhow::Result<SharedStore> {
    if std::env::var("MONGO_URL").is_err() {
        warn!("MONGO_URL not set, using in-memory store");
        let catalog = load_service_catalog(&config.catalog_path)?;
        return Ok(Arc::new(MemoryStore::from_catalog(catalog)));
    }

    let mongo = MongoConfig::from_env()?;
    let store = MongoStore::connect(&mongo).await?;

    match store.ping().await {
        Ok(()) => info!("Connected to MongoDB database {}", mongo.database),
        Err(e) => warn!("MongoDB not reachable at startup: {}", e),
    }

    Ok(Arc::new(store))
}

/// Load the seed catalog from a TOML file
fn load_service_catalog(path: &str) -> anyhow::Result<ServiceCatalog> {
    let candidates = [
        path.to_string(),
        format!("../{path}"),
        format!("../../{path}"),
    ];

    for candidate in &candidates {
        if let Ok(content) = std::fs::read_to_string(candidate) {
            let catalog = ServiceCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", candidate, e))?;
            info!("Loaded {} services from {}", catalog.len(), candidate);
            return Ok(catalog);
        }
    }

    // Return empty catalog if no config found
    warn!("No service catalog found at {}, using empty catalog", path);
    Ok(ServiceCatalog::default())
}
