//! # car-mongo
//!
//! MongoDB storage backend for car-doctor.
//!
//! Two collections in one database:
//!
//! | Collection | Access | Contents |
//! |------------|--------|----------|
//! | `services` | read | service catalog (title, price, details) |
//! | `checkOuts` | insert, read | booking submissions keyed by `uid` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use car_mongo::{MongoConfig, MongoStore};
//! use std::sync::Arc;
//!
//! let mongo = MongoConfig::from_env()?;
//! let store = Arc::new(MongoStore::connect(&mongo).await?);
//!
//! // Hand the store to the HTTP layer
//! let state = AppState::new(app_config, store);
//! ```

pub mod config;
pub mod convert;
pub mod store;

// Re-exports
pub use config::MongoConfig;
pub use store::MongoStore;
