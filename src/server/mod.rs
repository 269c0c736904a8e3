//! # HTTP Server for Form Filling
//!
//! Serves the carrier menu, the side-by-side editor, print documents, and a
//! small JSON API over the same templates.
//!
//! ## Usage
//!
//! ```bash
//! overprint serve --listen 0.0.0.0:8080 --assets ./assets/templates
//! ```
//!
//! Then open http://localhost:8080 in a browser.
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/` | Carrier menu |
//! | GET | `/templates/:id` | Editor; form state in the query |
//! | GET | `/templates/:id/print` | A4 print document |
//! | POST | `/templates/:id/complete` | End a print cycle |
//! | GET | `/pages/*path` | Scanned page images |
//! | GET | `/static/*path` | Stylesheet and page script |
//! | GET | `/api/templates` | Template list |
//! | GET | `/api/templates/:id` | Inputs, pages, defaults |
//! | POST | `/api/templates/:id/resolve` | Resolve a JSON form state |
//! | POST | `/api/debug/pick` | Replay picker events |
//! | GET | `/api/room` | Room rotation state |

mod handlers;
pub mod pages;
pub mod state;
mod static_files;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::assets::PAGES_ROUTE;
use crate::config::ServerConfig;
use crate::error::OverprintError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let pages = ServeDir::new(&state.config.asset_dir);

    Router::new()
        // Pages
        .route("/", get(handlers::forms::home))
        .route("/templates/:id", get(handlers::forms::editor))
        .route("/templates/:id/print", get(handlers::forms::print))
        .route("/templates/:id/complete", post(handlers::forms::complete))
        .route("/static/*path", get(static_files::asset_handler))
        .nest_service(PAGES_ROUTE, pages)
        // JSON API
        .route("/api/templates", get(handlers::api::list))
        .route("/api/templates/:id", get(handlers::api::detail))
        .route("/api/templates/:id/resolve", post(handlers::api::resolve))
        .route("/api/debug/pick", post(handlers::debug::pick))
        .route("/api/room", get(handlers::api::room))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use overprint::config::ServerConfig;
/// use overprint::server::serve;
///
/// # async fn example() -> Result<(), overprint::OverprintError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     ..ServerConfig::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), OverprintError> {
    config.validate()?;
    let state = Arc::new(AppState::new(config.clone())?);

    // Warm the page cache so the first editor load doesn't wait on disk
    for template in crate::templates::all() {
        state.loader.prefetch(&template.page_images());
    }

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| OverprintError::Config(format!("Failed to bind to {}: {}", config.listen_addr, e)))?;

    tracing::info!(
        listen = %config.listen_addr,
        assets = %config.asset_dir.display(),
        state = ?config.state_path,
        "overprint server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
