pub mod auth;
pub mod customers;
pub mod files;
pub mod measurements;
pub mod orders;
pub mod staff;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::metrics::encode_metrics;
use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

/// Build the full application router: public routes, the authenticated API and the docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let max_body = state.max_request_bytes;

    let api = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // staff
        .route("/api/admin/staff", post(staff::create_staff))
        .route("/api/admin/staff/:id", put(staff::update_staff).delete(staff::delete_staff))
        .route("/api/staff/all", get(staff::list_staff))
        .route("/api/staff/:id", get(staff::get_staff))
        .route("/api/staff/:id/photo", get(staff::get_staff_photo))
        .route("/api/staff/:id/document", get(staff::get_staff_document))
        // customers
        .route("/api/customer", post(customers::create_customer))
        .route("/api/customer/all", get(customers::list_customers))
        .route("/api/customer/search", get(customers::search_customers))
        .route(
            "/api/customer/:id",
            get(customers::get_customer).put(customers::update_customer).delete(customers::delete_customer),
        )
        // measurements
        .route("/api/measurements", post(measurements::create_measurement))
        .route("/api/measurements/customer/:customer_id", get(measurements::list_customer_measurements))
        .route(
            "/api/measurements/:id",
            get(measurements::get_measurement)
                .put(measurements::update_measurement)
                .delete(measurements::delete_measurement),
        )
        // orders
        .route("/api/order", post(orders::create_order))
        .route("/api/order/all", get(orders::list_orders))
        .route("/api/order/assigned", get(orders::list_assigned_orders))
        .route("/api/order/customer/:customer_id", get(orders::list_customer_orders))
        .route("/api/order/:id", get(orders::get_order).put(orders::update_order).delete(orders::delete_order))
        .route("/api/order/:id/items/:item_id/assign", put(orders::assign_item_staff))
        .route("/api/order/:id/items/:item_id/status", post(orders::update_item_status))
        .route("/api/order/:id/items/:item_id/image", put(orders::set_item_cloth_image))
        // files
        .route("/api/files/:id", get(files::get_file))
        .with_state(state.clone());

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(middleware::from_fn_with_state(state, auth::require_bearer_token_state))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
