//! # Service Types
//!
//! Catalog types for car-doctor. Services are owned by the external
//! database and only read here. For development the in-memory store can be
//! seeded from `config/services.toml`.

use crate::error::{BookingError, BookingResult};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Database object identifier (12 bytes, 24 hex chars on the wire).
///
/// Shared by services and checkouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a path segment, rejecting anything that is not 24 hex chars
    pub fn parse(raw: &str) -> BookingResult<Self> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| BookingError::InvalidIdentifier { id: raw.to_string() })
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for DocumentId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Hex form of the database identifier
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    /// Stored value as-is: number, numeric string or decimal
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub price: Value,

    /// Everything else stored on the document (image, description, facilities)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Projection returned by single-service lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub title: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub price: Value,
}

impl From<&Service> for ServiceSummary {
    fn from(service: &Service) -> Self {
        Self {
            title: service.title.clone(),
            price: service.price.clone(),
        }
    }
}

/// Catalog entry without an identifier, as written in the seed file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDraft {
    pub title: String,
    #[serde(default)]
    pub price: Value,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ServiceDraft {
    /// Assign an identifier
    pub fn into_service(self, id: DocumentId) -> Service {
        Service {
            id: id.to_hex(),
            title: self.title,
            price: self.price,
            details: self.details,
        }
    }
}

/// Seed catalog (loaded from config)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceCatalog {
    #[serde(default)]
    pub services: Vec<ServiceDraft>,
}

impl ServiceCatalog {
    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_id_parse() {
        let id = DocumentId::parse("635b8a1c9f1b2c3d4e5f6a7b").unwrap();
        assert_eq!(id.to_hex(), "635b8a1c9f1b2c3d4e5f6a7b");

        assert!(matches!(
            DocumentId::parse("not-an-id"),
            Err(BookingError::InvalidIdentifier { .. })
        ));
        // 23 chars
        assert!(DocumentId::parse("635b8a1c9f1b2c3d4e5f6a7").is_err());
        // right length, not hex
        assert!(DocumentId::parse("zzzb8a1c9f1b2c3d4e5f6a7b").is_err());
    }

    #[test]
    fn test_service_keeps_extra_fields() {
        let raw = json!({
            "_id": "635b8a1c9f1b2c3d4e5f6a7b",
            "title": "Engine Diagnostic",
            "price": 95.5,
            "img": "https://example.com/engine.jpg",
            "facility": [{"name": "Instant Car Services"}]
        });

        let service: Service = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(service.title, "Engine Diagnostic");
        assert_eq!(service.details.len(), 2);
        assert_eq!(serde_json::to_value(&service).unwrap(), raw);
    }

    #[test]
    fn test_price_is_kept_as_stored() {
        for price in [json!("20.00"), json!(150), json!({"$numberDecimal": "49.90"})] {
            let raw = json!({"title": "Battery Charge", "price": price});
            let summary: ServiceSummary = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(summary.price, price);
            assert_eq!(serde_json::to_value(&summary).unwrap(), raw);
        }
    }

    #[test]
    fn test_service_without_price() {
        let raw = json!({"_id": "635b8a1c9f1b2c3d4e5f6a7b", "title": "Inspection"});
        let service: Service = serde_json::from_value(raw.clone()).unwrap();

        assert!(service.price.is_null());
        assert_eq!(serde_json::to_value(&service).unwrap(), raw);
    }

    #[test]
    fn test_summary_has_only_title_and_price() {
        let summary = ServiceSummary {
            title: "Automatic Services".into(),
            price: json!(150),
        };
        let value = serde_json::to_value(&summary).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("price"));
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = ServiceCatalog::from_toml(
            r#"
            [[services]]
            title = "Electrical System"
            price = 200
            img = "electrical.jpg"

            [[services]]
            title = "Engine Oil Change"
            price = "55.99"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let service = catalog.services[0].clone().into_service(DocumentId::new());
        assert_eq!(service.price, json!(200));
        assert_eq!(service.details.get("img"), Some(&json!("electrical.jpg")));
        assert_eq!(catalog.services[1].price, json!("55.99"));
    }
}
