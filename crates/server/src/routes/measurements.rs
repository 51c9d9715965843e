use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use common::types::Envelope;
use models::measurement::Model as Measurement;
use service::measurement::domain::MeasurementInput;

use crate::errors::JsonApiError;
use crate::routes::auth::{AuthStaff, ServerState, SUPERVISORS};

/// POST /api/measurements
#[utoipa::path(post, path = "/api/measurements", tag = "measurements", request_body = crate::openapi::MeasurementRequest, responses((status = 201, description = "Created"), (status = 404, description = "Customer not found")))]
pub async fn create_measurement(
    State(state): State<ServerState>,
    who: AuthStaff,
    Json(input): Json<MeasurementInput>,
) -> Result<(StatusCode, Json<Envelope<Measurement>>), JsonApiError> {
    who.require(SUPERVISORS)?;
    let m = state.measurements.create(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok("Measurement created successfully", m))))
}

/// GET /api/measurements/:id
pub async fn get_measurement(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Measurement>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    let m = state.measurements.get(id).await?;
    Ok(Json(Envelope::ok("Measurement retrieved successfully", m)))
}

/// GET /api/measurements/customer/:customer_id
pub async fn list_customer_measurements(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Measurement>>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    let list = state.measurements.list_by_customer(customer_id).await?;
    Ok(Json(Envelope::ok("Measurements retrieved successfully", list)))
}

/// PUT /api/measurements/:id
pub async fn update_measurement(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
    Json(input): Json<MeasurementInput>,
) -> Result<Json<Envelope<Measurement>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    let m = state.measurements.update(id, input).await?;
    Ok(Json(Envelope::ok("Measurement updated successfully", m)))
}

/// DELETE /api/measurements/:id
pub async fn delete_measurement(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    state.measurements.delete(id).await?;
    Ok(Json(Envelope::empty("Measurement deleted successfully")))
}
