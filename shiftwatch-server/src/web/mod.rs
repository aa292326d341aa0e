//! HTTP API
//!
//! Routes map one-to-one onto shift book and workplace operations. Handlers
//! take the shared state, parse the body, call into `shiftwatch-core` and
//! turn any error into a JSON `{"error": ...}` response.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio_graceful_shutdown::SubsystemHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::state::SharedState;

mod handlers;
pub mod views;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/workplace",
            get(handlers::get_workplace).put(handlers::put_workplace),
        )
        .route("/api/workplace/distance", post(handlers::workplace_distance))
        .route("/api/workers/{worker}/status", post(handlers::worker_status))
        .route("/api/workers/{worker}/clock-in", post(handlers::clock_in))
        .route("/api/workers/{worker}/clock-out", post(handlers::clock_out))
        .route("/api/workers/{worker}/records", get(handlers::worker_records))
        .route("/api/workers/{worker}/stats", get(handlers::worker_stats))
        .route("/api/records", get(handlers::all_records))
        .route("/api/records/active", get(handlers::active_records))
        .route("/api/stats", get(handlers::all_stats))
        .route("/api/dashboard", get(handlers::dashboard))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server until shutdown is requested
pub async fn serve(
    subsys: SubsystemHandle,
    addr: SocketAddr,
    state: SharedState,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { subsys.on_shutdown_requested().await })
        .await?;

    log::info!("HTTP server stopped");
    Ok(())
}
