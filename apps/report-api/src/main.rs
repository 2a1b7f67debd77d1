//! Report API server - thin HTTP caller of the complaint pipeline
//!
//! One session per complaint, driven by discrete steps:
//! - capture evidence from a suspect URL (and classify it)
//! - upload manual screenshots
//! - build and render the complaint document
//! - download the artifact

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("report_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing report API...");
    let state = Arc::new(AppState::new()?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/session", post(handlers::create_session))
        .route(
            "/api/session/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/session/:id/capture", post(handlers::capture))
        .route(
            "/api/session/:id/screenshots",
            post(handlers::upload_screenshots),
        )
        .route("/api/session/:id/report", post(handlers::generate_report))
        .route(
            "/api/session/:id/document",
            get(handlers::download_document),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting report API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
