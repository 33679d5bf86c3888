//! # MongoDB Store
//!
//! `BookingStore` over two MongoDB collections. The driver pools
//! connections internally; one `MongoStore` is built at startup and shared
//! by every request.

use crate::config::MongoConfig;
use crate::convert::{checkout_to_document, from_document};
use async_trait::async_trait;
use car_core::{
    BookingError, BookingResult, BookingStore, Checkout, DocumentId, NewCheckout, Service,
    ServiceSummary,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::{debug, info, instrument};

/// MongoDB-backed store
pub struct MongoStore {
    database: Database,
    services: Collection<Document>,
    checkouts: Collection<Document>,
}

impl MongoStore {
    /// Build the client and collection handles.
    ///
    /// The driver connects lazily, so an unreachable server is not an error
    /// here; use [`BookingStore::ping`] to probe it.
    pub async fn connect(config: &MongoConfig) -> BookingResult<Self> {
        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| BookingError::Configuration(format!("invalid MONGO_URL: {e}")))?;
        options.app_name = Some("car-doctor".to_string());

        let client = Client::with_options(options)
            .map_err(|e| BookingError::Configuration(e.to_string()))?;

        info!(
            "MongoDB client ready: url={}, db={}",
            config.redacted_url(),
            config.database
        );

        Ok(Self::from_database(client.database(&config.database), config))
    }

    /// Wrap an existing database handle
    pub fn from_database(database: Database, config: &MongoConfig) -> Self {
        Self {
            services: database.collection(&config.services_collection),
            checkouts: database.collection(&config.checkouts_collection),
            database,
        }
    }
}

fn database_error(err: mongodb::error::Error) -> BookingError {
    BookingError::Database(err.to_string())
}

#[async_trait]
impl BookingStore for MongoStore {
    #[instrument(skip(self))]
    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        let cursor = self.services.find(doc! {}).await.map_err(database_error)?;
        let docs: Vec<Document> = cursor.try_collect().await.map_err(database_error)?;
        debug!("Fetched {} services", docs.len());

        docs.into_iter().map(from_document).collect()
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_service(&self, id: &DocumentId) -> BookingResult<Option<ServiceSummary>> {
        let found = self
            .services
            .find_one(doc! { "_id": id.object_id() })
            .projection(doc! { "title": 1, "price": 1, "_id": 0 })
            .await
            .map_err(database_error)?;

        found.map(from_document).transpose()
    }

    #[instrument(skip(self, checkout), fields(uid = %checkout.uid))]
    async fn insert_checkout(&self, checkout: NewCheckout) -> BookingResult<DocumentId> {
        let document = checkout_to_document(&checkout)?;
        let result = self
            .checkouts
            .insert_one(document)
            .await
            .map_err(database_error)?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            BookingError::Database(format!(
                "inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })?;

        Ok(DocumentId::from(oid))
    }

    #[instrument(skip(self))]
    async fn checkouts_for(&self, uid: &str) -> BookingResult<Vec<Checkout>> {
        let cursor = self
            .checkouts
            .find(doc! { "uid": uid })
            .await
            .map_err(database_error)?;
        let docs: Vec<Document> = cursor.try_collect().await.map_err(database_error)?;

        docs.into_iter().map(from_document).collect()
    }

    async fn ping(&self) -> BookingResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(database_error)
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
