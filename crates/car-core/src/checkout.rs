//! # Checkout Types
//!
//! A checkout is a user's booking submission. Only the owner `uid` is
//! required; every other submitted field is stored as-is.

use crate::error::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the owner's user identifier
pub const OWNER_FIELD: &str = "uid";

/// A stored checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    /// Hex form of the database identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Owner's user identifier (external identity system)
    pub uid: String,

    /// Service references, totals, dates, customer details
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A checkout submission that passed the edge checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCheckout {
    pub uid: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewCheckout {
    /// Build from a raw request body.
    ///
    /// The body must be a JSON object carrying a non-empty string `uid`.
    /// A client-supplied `_id` is dropped so the store assigns one.
    pub fn from_json(body: Value) -> BookingResult<Self> {
        let Value::Object(mut fields) = body else {
            return Err(BookingError::InvalidRequest(
                "checkout body must be a JSON object".to_string(),
            ));
        };

        let uid = match fields.remove(OWNER_FIELD) {
            Some(Value::String(uid)) if !uid.trim().is_empty() => uid,
            Some(_) => {
                return Err(BookingError::InvalidRequest(
                    "checkout uid must be a non-empty string".to_string(),
                ))
            }
            None => {
                return Err(BookingError::InvalidRequest(
                    "checkout is missing uid".to_string(),
                ))
            }
        };

        fields.remove("_id");

        Ok(Self { uid, fields })
    }

    /// Attach the identifier assigned by the store
    pub fn into_checkout(self, id: impl Into<String>) -> Checkout {
        Checkout {
            id: id.into(),
            uid: self.uid,
            fields: self.fields,
        }
    }
}
