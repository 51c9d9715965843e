use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::MessageResponse;
use models::order::Model as Order;
use service::order::domain::{AssignStaffInput, CreateOrderInput, ItemStatusInput, UpdateOrderInput};
use service::pagination::{Page, Pagination};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::multipart::FormData;
use crate::routes::auth::{AuthStaff, ServerState, ADMINS, SUPERVISORS};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl OrderListQuery {
    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) }
    }
}

/// POST /api/order: `order` JSON part plus up to five `images`.
#[utoipa::path(post, path = "/api/order", tag = "orders", request_body(content = crate::openapi::OrderForm, content_type = "multipart/form-data"), responses((status = 200, description = "Created"), (status = 400, description = "Validation error")))]
pub async fn create_order(
    State(state): State<ServerState>,
    who: AuthStaff,
    mp: Multipart,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let actor = who.require(SUPERVISORS)?;
    let mut form = FormData::read(mp).await?;
    let input: CreateOrderInput = form.json("order")?;
    let images = form.files("images");
    let saved = state.orders.create(actor, input, images).await?;
    metrics::record_files_stored(saved.image_ids.0.len());
    Ok(Json(MessageResponse::with_id(saved.id.to_string(), "Order created successfully")))
}

/// GET /api/order/:id
pub async fn get_order(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.orders.get(id).await?))
}

/// GET /api/order/all
#[utoipa::path(get, path = "/api/order/all", tag = "orders", params(("page" = Option<u32>, Query, description = "1-based page"), ("per_page" = Option<u32>, Query, description = "1..=100"), ("status" = Option<String>, Query, description = "Pending, InProgress or Completed")), responses((status = 200, description = "One page of orders")))]
pub async fn list_orders(
    State(state): State<ServerState>,
    who: AuthStaff,
    Query(q): Query<OrderListQuery>,
) -> Result<Json<Page<Order>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.orders.list(q.pagination(), q.status.as_deref()).await?))
}

/// GET /api/order/customer/:customer_id
pub async fn list_customer_orders(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<Order>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.orders.list_by_customer(customer_id).await?))
}

/// GET /api/order/assigned: orders with an item assigned to the caller.
pub async fn list_assigned_orders(
    State(state): State<ServerState>,
    AuthStaff(who): AuthStaff,
) -> Result<Json<Vec<Order>>, JsonApiError> {
    Ok(Json(state.orders.list_assigned(who.id).await?))
}

/// PUT /api/order/:id
pub async fn update_order(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<Json<Order>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.orders.update(id, input).await?))
}

/// DELETE /api/order/:id
pub async fn delete_order(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    who.require(ADMINS)?;
    state.orders.delete(id).await?;
    Ok(Json(MessageResponse::with_id(id.to_string(), "Order deleted successfully")))
}

/// PUT /api/order/:id/items/:item_id/assign
#[utoipa::path(put, path = "/api/order/{id}/items/{item_id}/assign", tag = "orders", params(("id" = Uuid, Path, description = "Order id"), ("item_id" = Uuid, Path, description = "Item id")), request_body = crate::openapi::AssignRequest, responses((status = 200, description = "Updated order"), (status = 400, description = "Wrong role or stage")))]
pub async fn assign_item_staff(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<AssignStaffInput>,
) -> Result<Json<Order>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.orders.assign_item_staff(id, item_id, input).await?))
}

/// POST /api/order/:id/items/:item_id/status; the workflow decides who may move what.
#[utoipa::path(post, path = "/api/order/{id}/items/{item_id}/status", tag = "orders", params(("id" = Uuid, Path, description = "Order id"), ("item_id" = Uuid, Path, description = "Item id")), request_body = crate::openapi::ItemStatusRequest, responses((status = 200, description = "Updated order"), (status = 400, description = "Transition not allowed"), (status = 403, description = "Not assigned to this stage")))]
pub async fn update_item_status(
    State(state): State<ServerState>,
    AuthStaff(who): AuthStaff,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<ItemStatusInput>,
) -> Result<Json<Order>, JsonApiError> {
    let change = state.orders.update_item_status(id, item_id, &input.status, &who).await?;
    metrics::record_transition(change.to.as_str());
    Ok(Json(change.order))
}

/// PUT /api/order/:id/items/:item_id/image
pub async fn set_item_cloth_image(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    mp: Multipart,
) -> Result<Json<Order>, JsonApiError> {
    who.require(SUPERVISORS)?;
    let mut form = FormData::read(mp).await?;
    let image = form.file("image").ok_or_else(|| JsonApiError::bad_request("missing image part"))?;
    let saved = state.orders.set_item_cloth_image(id, item_id, image).await?;
    metrics::record_files_stored(1);
    Ok(Json(saved))
}
