//! Ubermelon shop server.
//!
//! Browse melons, look at a single melon, and fill a shopping cart that lives in the visitor's
//! session. Login and checkout exist as routes but are not implemented yet.
//!
//!
//!
//! # Routes
//!
//! | Method | Path                    | Effect                                              |
//! |--------|-------------------------|-----------------------------------------------------|
//! | GET    | `/`                     | Homepage                                            |
//! | GET    | `/melons`               | Every melon in the catalog                          |
//! | GET    | `/melon/{id}`           | One melon, 404 for unknown ids                      |
//! | GET    | `/cart`                 | Cart line items and order total                     |
//! | GET    | `/add_to_cart/{id}`     | Add one melon, flash a confirmation, go to `/cart`  |
//! | GET    | `/login`                | Login form                                          |
//! | POST   | `/login`                | Not implemented, 501                                |
//! | GET    | `/checkout`             | Flash a notice, go to `/melons`                     |
//!
//!
//!
//! # State
//!
//! - The catalog is read-only and shared by every request
//! - The cart is per visitor and travels in a signed cookie, see [`session`]
//! - Nothing is persisted server side
//!
//! A cart can hold ids that are not in the catalog, since adding never checks. Such a cart
//! fails with 404 when viewed until the visitor's cookie is cleared.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! SESSION_SECRET=$(openssl rand -hex 32) RUST_LOG=info cargo run -p ubermelon
//! ```
//!
//! Environment:
//! - `RUST_HOST`, default `0.0.0.0`
//! - `RUST_PORT`, default `5000`
//! - `SESSION_SECRET`, required, read from `/run/secrets/SESSION_SECRET` first
//! - `CATALOG_PATH`, optional JSON seed replacing the built-in catalog
use std::sync::Arc;

use axum::{Router, routing::get};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod account;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use config::Config;
use routes::{
    add_to_cart_handler, checkout_handler, index_handler, list_melons_handler,
    process_login_handler, show_cart_handler, show_login_handler, show_melon_handler,
};
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");
    let app = app(state.clone());

    let address = state.config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/melons", get(list_melons_handler))
        .route("/melon/{melon_id}", get(show_melon_handler))
        .route("/cart", get(show_cart_handler))
        .route("/add_to_cart/{melon_id}", get(add_to_cart_handler))
        .route("/login", get(show_login_handler).post(process_login_handler))
        .route("/checkout", get(checkout_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
