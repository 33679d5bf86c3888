//! # car-core
//!
//! Core types and traits for the car-doctor booking backend.
//!
//! This crate provides:
//! - `Service`, `ServiceSummary` and `ServiceCatalog` for the service catalog
//! - `Checkout` and `NewCheckout` for booking submissions
//! - `BookingStore` trait for implementing storage backends
//! - `MemoryStore`, an in-process backend for development and tests
//! - `BookingError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use car_core::{BookingStore, DocumentId, MemoryStore, NewCheckout};
//!
//! let store = MemoryStore::new();
//!
//! // Validate and store a submission
//! let checkout = NewCheckout::from_json(body)?;
//! let id = store.insert_checkout(checkout).await?;
//!
//! // Read back everything the user owns
//! let mine = store.checkouts_for("u1").await?;
//! ```

pub mod checkout;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use checkout::{Checkout, NewCheckout, OWNER_FIELD};
pub use error::{BookingError, BookingResult};
pub use memory::MemoryStore;
pub use service::{DocumentId, Service, ServiceCatalog, ServiceDraft, ServiceSummary};
pub use store::{BookingStore, SharedStore};
