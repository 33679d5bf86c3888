//! # In-Memory Store
//!
//! `BookingStore` backed by process memory. Used when no database URL is
//! configured and by the HTTP tests.

use crate::checkout::{Checkout, NewCheckout};
use crate::error::BookingResult;
use crate::service::{DocumentId, Service, ServiceCatalog, ServiceSummary};
use crate::store::BookingStore;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory catalog and checkout log
#[derive(Debug, Default)]
pub struct MemoryStore {
    services: RwLock<Vec<Service>>,
    checkouts: RwLock<Vec<Checkout>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose catalog holds the seed entries
    pub fn from_catalog(catalog: ServiceCatalog) -> Self {
        let services = catalog
            .services
            .into_iter()
            .map(|draft| draft.into_service(DocumentId::new()))
            .collect();

        Self {
            services: RwLock::new(services),
            checkouts: RwLock::new(Vec::new()),
        }
    }

    /// Builder: add a service
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.get_mut().push(service);
        self
    }

    /// Add a service and return its identifier
    pub async fn add_service(&self, service: Service) -> String {
        let id = service.id.clone();
        self.services.write().await.push(service);
        id
    }

    /// Number of stored checkouts
    pub async fn checkout_count(&self) -> usize {
        self.checkouts.read().await.len()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        Ok(self.services.read().await.clone())
    }

    async fn find_service(&self, id: &DocumentId) -> BookingResult<Option<ServiceSummary>> {
        let hex = id.to_hex();
        Ok(self
            .services
            .read()
            .await
            .iter()
            .find(|s| s.id == hex)
            .map(ServiceSummary::from))
    }

    async fn insert_checkout(&self, checkout: NewCheckout) -> BookingResult<DocumentId> {
        let id = DocumentId::new();
        debug!(uid = %checkout.uid, id = %id, "storing checkout in memory");
        self.checkouts
            .write()
            .await
            .push(checkout.into_checkout(id.to_hex()));
        Ok(id)
    }

    async fn checkouts_for(&self, uid: &str) -> BookingResult<Vec<Checkout>> {
        Ok(self
            .checkouts
            .read()
            .await
            .iter()
            .filter(|c| c.uid == uid)
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
