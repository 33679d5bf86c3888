//! # Car Doctor
//!
//! Booking backend for a car-service site.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ACCESS_TOKEN_SECRET=change-me
//! export MONGO_URL=mongodb://localhost:27017   # omit to run on the in-memory store
//! export ALLOWED_ORIGINS=http://localhost:5173
//!
//! # Run the server
//! car-doctor
//! ```

use car_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::from_env().await?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Store backend: {}", state.store.backend_name());
    if state.config.allowed_origins.is_empty() {
        info!("CORS: any origin (no credentials)");
    } else {
        info!("CORS origins: {:?}", state.config.allowed_origins);
    }

    // Create router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Car Doctor is running on {}", addr.port());

    axum::serve(listener, app).await?;

    Ok(())
}
