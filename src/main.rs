//! Demo server for the in-place editor helpers.
//!
//! Serves a settings page whose values are edited in place.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use in_place_editor::{bind_addr, router, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = Arc::new(AppState::new());
    let app = router(state);

    let addr = bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    tracing::info!("Settings demo running at http://{}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
