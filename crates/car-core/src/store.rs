//! # Booking Store Trait
//!
//! The seam between the HTTP layer and the document database.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BookingStore (trait)                     │
//! │  ├── list_services()                                        │
//! │  ├── find_service()                                         │
//! │  ├── insert_checkout()                                      │
//! │  └── checkouts_for()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │                   │
//!          ┌───────┴───────┐   ┌───────┴───────┐
//!          │  MongoStore   │   │  MemoryStore  │
//!          │  (car-mongo)  │   │  (dev/tests)  │
//!          └───────────────┘   └───────────────┘
//! ```

use crate::checkout::{Checkout, NewCheckout};
use crate::error::BookingResult;
use crate::service::{DocumentId, Service, ServiceSummary};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage backend for the catalog and checkouts.
///
/// Implementations are shared across request tasks and must not hold
/// per-request state.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Every service in the catalog, in store iteration order.
    async fn list_services(&self) -> BookingResult<Vec<Service>>;

    /// Title and price of one service, or `None` if absent.
    async fn find_service(&self, id: &DocumentId) -> BookingResult<Option<ServiceSummary>>;

    /// Persist a checkout and return the assigned identifier.
    ///
    /// No deduplication: identical submissions produce distinct records.
    async fn insert_checkout(&self, checkout: NewCheckout) -> BookingResult<DocumentId>;

    /// All checkouts owned by `uid`.
    async fn checkouts_for(&self, uid: &str) -> BookingResult<Vec<Checkout>>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> BookingResult<()> {
        Ok(())
    }

    /// Backend name (for logging and health output).
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a shared store (dynamic dispatch)
pub type SharedStore = Arc<dyn BookingStore>;
