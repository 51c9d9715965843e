use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::MessageResponse;
use models::customer::Model as Customer;
use service::customer::domain::CustomerInput;
use service::pagination::{Page, Pagination};

use crate::errors::JsonApiError;
use crate::multipart::FormOrJson;
use crate::routes::auth::{AuthStaff, ServerState, SUPERVISORS};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// POST /api/customer
#[utoipa::path(post, path = "/api/customer", tag = "customers", request_body = crate::openapi::CustomerRequest, responses((status = 200, description = "Created"), (status = 409, description = "Duplicate name or phone")))]
pub async fn create_customer(
    State(state): State<ServerState>,
    who: AuthStaff,
    FormOrJson(input): FormOrJson<CustomerInput>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    who.require(SUPERVISORS)?;
    let saved = state.customers.create(input).await?;
    Ok(Json(MessageResponse::with_id(saved.id.to_string(), "Customer created successfully")))
}

/// PUT /api/customer/:id
pub async fn update_customer(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
    FormOrJson(input): FormOrJson<CustomerInput>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    who.require(SUPERVISORS)?;
    let saved = state.customers.update(id, input).await?;
    Ok(Json(MessageResponse::with_id(saved.id.to_string(), "Customer updated successfully")))
}

/// DELETE /api/customer/:id
pub async fn delete_customer(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    who.require(SUPERVISORS)?;
    state.customers.delete(id).await?;
    Ok(Json(MessageResponse::with_id(id.to_string(), "Customer deleted successfully")))
}

/// GET /api/customer/:id
pub async fn get_customer(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.customers.get(id).await?))
}

/// GET /api/customer/all
#[utoipa::path(get, path = "/api/customer/all", tag = "customers", params(("page" = Option<u32>, Query, description = "1-based page"), ("per_page" = Option<u32>, Query, description = "1..=100")), responses((status = 200, description = "One page of customers")))]
pub async fn list_customers(
    State(state): State<ServerState>,
    who: AuthStaff,
    Query(page): Query<Pagination>,
) -> Result<Json<Page<Customer>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.customers.list(page).await?))
}

/// GET /api/customer/search
#[utoipa::path(get, path = "/api/customer/search", tag = "customers", params(("query" = String, Query, description = "Substring"), ("type" = Option<String>, Query, description = "name or phonenumber")), responses((status = 200, description = "Matches"), (status = 400, description = "Unknown search type")))]
pub async fn search_customers(
    State(state): State<ServerState>,
    who: AuthStaff,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Customer>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.customers.search(&q.query, q.kind.as_deref()).await?))
}
