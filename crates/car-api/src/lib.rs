//! # car-api
//!
//! HTTP API layer for car-doctor-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the service catalog and checkouts
//! - Cookie-carried session tokens guarding per-user checkout listing
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Greeting |
//! | GET | `/health` | Health check |
//! | GET | `/api/services` | List services |
//! | GET | `/api/service/{id}` | Title and price of a service |
//! | POST | `/api/checkout` | Save a checkout |
//! | GET | `/api/checkouts/{uid}` | Checkouts owned by the session user |
//! | POST | `/api/jwt` | Issue session cookie |
//! | POST | `/api/logout` | Clear session cookie |

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

pub use routes::create_router;
pub use session::{Claims, SessionKeys};
pub use state::{AppConfig, AppState};
