//! BSON ↔ domain conversion.
//!
//! Documents leave the driver as BSON and are turned into relaxed extended
//! JSON with `_id` flattened to its hex string, then deserialized into the
//! `car-core` types.

use car_core::{BookingError, BookingResult, NewCheckout};
use mongodb::bson::{self, Bson, Document};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Relaxed extended JSON with a hex `_id`
pub fn document_to_json(mut doc: Document) -> Value {
    if let Ok(oid) = doc.get_object_id("_id") {
        doc.insert("_id", oid.to_hex());
    }
    Bson::Document(doc).into_relaxed_extjson()
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> BookingResult<T> {
    Ok(serde_json::from_value(document_to_json(doc))?)
}

pub fn checkout_to_document(checkout: &NewCheckout) -> BookingResult<Document> {
    bson::to_document(checkout).map_err(|e| BookingError::Serialization(e.to_string()))
}
