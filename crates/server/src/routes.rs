use axum::{
    routing::{get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod customers;
pub mod addresses;

/// Handler state: the pooled connection, cloned into every request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

/// Liveness probe; does not touch the database.
#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Generated OpenAPI document for every route.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Routes under `/api`.
///
/// Customers are the root resource; addresses are created and listed through
/// their owner but updated and deleted by their own id.
fn api_routes() -> Router<ServerState> {
    Router::new()
        // collection: filtered/paged listing and creation
        .route("/customers", get(customers::list).post(customers::create))
        // single customer, with its addresses on GET
        .route(
            "/customers/:id",
            get(customers::get).put(customers::update).delete(customers::delete),
        )
        // addresses owned by a customer
        .route("/customers/:id/addresses", get(addresses::list).post(addresses::create))
        // a single address by its own id
        .route("/addresses/:address_id", put(addresses::update).delete(addresses::delete))
}

/// Build the full application router: health, OpenAPI document and the `/api` surface
///
/// Layers apply outermost-last: tracing wraps CORS, which wraps the routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        // public, unauthenticated
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request, carrying method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // request received
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses and handler errors
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
