//! # Fichero REST API
//!
//! REST surface of the fichero document store.
//!
//! Handles:
//! - HTTP endpoints with axum, one module per document resource
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (envelope serialisation, CORS)
//!
//! The router is assembled by [`app`] so binaries and tests drive the same
//! surface.

#![warn(rust_2018_idioms)]

pub mod csv;
pub mod error;
pub mod json;
pub mod schemas;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fichero_core::DocumentService;

use crate::schemas::{Envelope, HealthRes, StoreDocumentReq, UpdateDocumentReq};

/// Application state shared across REST API handlers
///
/// Holds the document service every resource handler works through.
#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        json::index,
        json::store,
        json::show,
        json::update,
        json::destroy,
        csv::index,
        csv::store,
        csv::show,
        csv::update,
        csv::destroy,
    ),
    components(schemas(Envelope, StoreDocumentReq, UpdateDocumentReq, HealthRes))
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the document store. Used for
/// monitoring and load balancer health checks.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        mensaje: schemas::MSG_HEALTH.to_owned(),
    })
}

/// Builds the application router
///
/// Mounts the JSON and CSV resources and the health endpoint, merges the
/// Swagger UI and applies a permissive CORS layer.
///
/// # Arguments
/// * `state` - Shared application state
///
/// # Returns
/// * `Router` - The fully wired router, ready to serve
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/json", get(json::index))
        .route("/json", post(json::store))
        .route("/json/:filename", get(json::show))
        .route("/json/:filename", put(json::update))
        .route("/json/:filename", delete(json::destroy))
        .route("/csv", get(csv::index))
        .route("/csv", post(csv::store))
        .route("/csv/:filename", get(csv::show))
        .route("/csv/:filename", put(csv::update))
        .route("/csv/:filename", delete(csv::destroy))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
