//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository and image store construction
//! - `routes/`: HTTP routes + handlers
//! - `upload.rs`: multipart form parsing and image intake
//! - `dto.rs`: JSON mapping helpers (absolute image URLs)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod upload;

pub use services::AppServices;

/// Route segment stored images are served under.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router(Arc::new(services)))
}

/// Router over already-constructed services.
pub fn router(services: Arc<AppServices>) -> Router {
    let uploads = ServeDir::new(services.images.dir());

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest_service(&format!("/{UPLOAD_PREFIX}"), uploads)
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
