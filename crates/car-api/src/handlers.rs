//! # Request Handlers
//!
//! Axum request handlers for the booking API.
//! Every handler answers with a response; failures are logged here and
//! turned into a JSON error body.

use crate::session::{cleared_cookie, session_cookie, Claims};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use car_core::{BookingError, Checkout, DocumentId, NewCheckout, Service, ServiceSummary};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Body returned for a saved checkout
#[derive(Debug, Serialize)]
pub struct CheckoutAck {
    pub message: String,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

/// Body returned by login/logout
#[derive(Debug, Serialize)]
pub struct SessionAck {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Server-side failures keep their detail in the logs, never in the body.
pub fn booking_error_to_response(err: BookingError) -> ApiError {
    let code = err.status_code();
    let message = if err.is_server_error() {
        "Internal server error".to_string()
    } else {
        err.to_string()
    };
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(message, code)),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Root greeting
pub async fn root() -> &'static str {
    "Hello from Car Doctor"
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = match state.store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            warn!("Store ping failed: {}", e);
            "degraded"
        }
    };

    Json(serde_json::json!({
        "status": status,
        "service": "car-doctor",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store.backend_name(),
    }))
}

/// List the whole service catalog
#[instrument(skip(state))]
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    let services = state.store.list_services().await.map_err(|e| {
        error!("Error fetching services: {}", e);
        booking_error_to_response(e)
    })?;

    Ok(Json(services))
}

/// Title and price of a single service
#[instrument(skip(state))]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceSummary>, ApiError> {
    let service_id = DocumentId::parse(&id).map_err(|e| {
        error!("Error fetching service: {}", e);
        booking_error_to_response(e)
    })?;

    let summary = state.store.find_service(&service_id).await.map_err(|e| {
        error!("Error fetching service {}: {}", service_id, e);
        booking_error_to_response(e)
    })?;

    summary
        .map(Json)
        .ok_or_else(|| booking_error_to_response(BookingError::ServiceNotFound { id }))
}

/// Save a checkout submission
#[instrument(skip(state, body))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CheckoutAck>), ApiError> {
    let checkout = NewCheckout::from_json(body).map_err(|e| {
        warn!("Rejected checkout: {}", e);
        booking_error_to_response(e)
    })?;
    let uid = checkout.uid.clone();

    let id = state.store.insert_checkout(checkout).await.map_err(|e| {
        error!("Error saving checkout: {}", e);
        booking_error_to_response(e)
    })?;

    info!("Saved checkout: id={}, uid={}", id, uid);

    Ok((
        StatusCode::CREATED,
        Json(CheckoutAck {
            message: "Checkout list saved successfully".to_string(),
            inserted_id: id.to_hex(),
        }),
    ))
}

/// Checkouts owned by the session's user
#[instrument(skip(state, claims))]
pub async fn list_checkouts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Checkout>>, ApiError> {
    if claims.uid != uid {
        warn!(
            "Ownership check failed: session uid={}, requested uid={}",
            claims.uid, uid
        );
        return Err(booking_error_to_response(BookingError::Forbidden {
            session_uid: claims.uid,
            requested_uid: uid,
        }));
    }

    let checkouts = state.store.checkouts_for(&uid).await.map_err(|e| {
        error!("Error fetching checkouts for {}: {}", uid, e);
        booking_error_to_response(e)
    })?;

    Ok(Json(checkouts))
}

/// Sign the login payload and set the session cookie
#[instrument(skip(state, payload))]
pub async fn issue_session(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, claims) = state.keys.issue(payload).map_err(|e| {
        error!("Error signing session token: {}", e);
        booking_error_to_response(e)
    })?;
    if claims.uid.is_empty() {
        warn!("Session issued without uid; it owns no checkouts");
    }

    info!("Issued session: uid={}, exp={}", claims.uid, claims.exp);

    let cookie = session_cookie(
        &token,
        state.keys.ttl().num_seconds(),
        state.config.cookie_secure,
    );
    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(SessionAck { success: true }),
    ))
}

/// Clear the session cookie
pub async fn clear_session(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            header::SET_COOKIE,
            cleared_cookie(state.config.cookie_secure).to_string(),
        )],
        Json(SessionAck { success: true }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Services not found", 404);
        assert_eq!(err.message, "Services not found");
        assert_eq!(err.code, 404);
    }

    #[test]
    fn test_server_errors_are_generic() {
        let (status, Json(body)) =
            booking_error_to_response(BookingError::Database("connection refused at 10.0.0.5".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");

        let (status, Json(body)) = booking_error_to_response(BookingError::InvalidIdentifier {
            id: "xyz".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("xyz"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let (status, Json(body)) =
            booking_error_to_response(BookingError::ServiceNotFound { id: "x".into() });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Services not found");

        let (status, _) = booking_error_to_response(BookingError::Forbidden {
            session_uid: "u1".into(),
            requested_uid: "u2".into(),
        });
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
