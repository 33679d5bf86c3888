//! Request logging and session verification middleware.

use crate::handlers::{booking_error_to_response, ApiError};
use crate::session::{cookie_value, SESSION_COOKIE};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use car_core::BookingError;
use tracing::{info, warn};

/// Log method, host and path of every request
pub async fn log_request(req: Request, next: Next) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    info!(method = %req.method(), host = %host, path = %req.uri().path(), "request");

    next.run(req).await
}

/// Reject requests without a valid session cookie.
///
/// On success the decoded [`Claims`](crate::session::Claims) are inserted
/// into the request extensions for the handler.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookie_value(req.headers(), SESSION_COOKIE).ok_or_else(|| {
        warn!(path = %req.uri().path(), "no session cookie");
        booking_error_to_response(BookingError::Unauthorized(
            "missing session cookie".to_string(),
        ))
    })?;

    let claims = state.keys.verify(&token).map_err(|e| {
        warn!("Session rejected: {}", e);
        booking_error_to_response(e)
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
