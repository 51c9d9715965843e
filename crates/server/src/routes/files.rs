use axum::{
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::routes::auth::{AuthStaff, ServerState};
use crate::routes::staff::file_response;

/// GET /api/files/:id: raw bytes with the stored content type.
#[utoipa::path(get, path = "/api/files/{id}", tag = "files", params(("id" = Uuid, Path, description = "File id")), responses((status = 200, description = "Raw bytes"), (status = 404, description = "Not found")))]
pub async fn get_file(
    State(state): State<ServerState>,
    _who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Response, JsonApiError> {
    Ok(file_response(state.files.fetch(id).await?))
}
