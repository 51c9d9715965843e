use axum::{
    extract::{Multipart, Path, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::types::MessageResponse;
use models::staff::Model as Staff;
use service::errors::ServiceError;
use service::files::FileContent;
use service::staff::domain::{CreateStaffInput, StaffSummary, UpdateStaffInput};
use service::staff::service::StaffFile;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::multipart::FormData;
use crate::routes::auth::{AuthStaff, ServerState, ADMINS, SUPERVISORS};

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    #[serde(default)]
    pub role: Option<String>,
}

/// Where to fetch one of the staff member's files.
#[derive(Debug, Serialize)]
pub struct FileDescriptor {
    pub id: Uuid,
    pub content_type: String,
    pub url: String,
}

/// Staff record (pin hash never serialized) plus file descriptors.
#[derive(Debug, Serialize)]
pub struct StaffDetails {
    #[serde(flatten)]
    pub staff: Staff,
    pub photo: Option<FileDescriptor>,
    pub document_photo: Option<FileDescriptor>,
}

pub(crate) fn file_response(f: FileContent) -> Response {
    ([(CONTENT_TYPE, f.content_type)], f.data).into_response()
}

fn create_input(form: &mut FormData) -> CreateStaffInput {
    CreateStaffInput {
        name: form.text_or_empty("name"),
        username: form.text_or_empty("username"),
        phone_number: form.text_or_empty("phonenumber"),
        alternate_phone_number: form.text("alternatephonenumber"),
        email: form.text_or_empty("email"),
        date_of_birth: form.text("dateofbirth"),
        sex: form.text_or_empty("sex"),
        marital_status: form.text_or_empty("maritalstatus"),
        role: form.text_or_empty("role"),
        security_pin: form.text_or_empty("securitypin"),
        joined_date: form.text_or_empty("joineddate"),
        document_type: form.text_or_empty("documentType"),
        address: form.text("address"),
    }
}

fn update_input(form: &mut FormData) -> UpdateStaffInput {
    UpdateStaffInput {
        name: form.text("name"),
        username: form.text("username"),
        phone_number: form.text("phonenumber"),
        alternate_phone_number: form.text("alternatephonenumber"),
        email: form.text("email"),
        date_of_birth: form.text("dateofbirth"),
        sex: form.text("sex"),
        marital_status: form.text("maritalstatus"),
        role: form.text("role"),
        security_pin: form.text("securitypin"),
        joined_date: form.text("joineddate"),
        document_type: form.text("documentType"),
        address: form.text("address"),
    }
}

/// POST /api/admin/staff
#[utoipa::path(post, path = "/api/admin/staff", tag = "staff", request_body(content = crate::openapi::StaffForm, content_type = "multipart/form-data"), responses((status = 200, description = "Created"), (status = 400, description = "Validation error"), (status = 409, description = "Duplicate username, email or phone")))]
pub async fn create_staff(
    State(state): State<ServerState>,
    who: AuthStaff,
    mp: Multipart,
) -> Result<Json<MessageResponse>, JsonApiError> {
    who.require(ADMINS)?;
    let mut form = FormData::read(mp).await?;
    let input = create_input(&mut form);
    let photo = form.file("photo");
    let document = form.file("documentphoto");
    let uploads = photo.iter().count() + document.iter().count();
    let saved = state.staff.create(input, photo, document).await?;
    metrics::record_files_stored(uploads);
    Ok(Json(MessageResponse::with_id(saved.id.to_string(), "Staff added successfully")))
}

/// PUT /api/admin/staff/:id
pub async fn update_staff(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<MessageResponse>, JsonApiError> {
    who.require(ADMINS)?;
    let mut form = FormData::read(mp).await?;
    let input = update_input(&mut form);
    let photo = form.file("photo");
    let document = form.file("documentphoto");
    let uploads = photo.iter().count() + document.iter().count();
    let saved = state.staff.update(id, input, photo, document).await?;
    metrics::record_files_stored(uploads);
    Ok(Json(MessageResponse::with_id(saved.id.to_string(), "Staff updated successfully")))
}

/// DELETE /api/admin/staff/:id
pub async fn delete_staff(
    State(state): State<ServerState>,
    who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let actor = who.require(ADMINS)?;
    state.staff.delete(actor.id, id).await?;
    Ok(Json(MessageResponse::with_id(id.to_string(), "Staff deleted successfully")))
}

/// GET /api/staff/all
#[utoipa::path(get, path = "/api/staff/all", tag = "staff", params(("role" = Option<String>, Query, description = "Role filter")), responses((status = 200, description = "Staff summaries")))]
pub async fn list_staff(
    State(state): State<ServerState>,
    who: AuthStaff,
    Query(q): Query<StaffListQuery>,
) -> Result<Json<Vec<StaffSummary>>, JsonApiError> {
    who.require(SUPERVISORS)?;
    Ok(Json(state.staff.list(q.role.as_deref()).await?))
}

/// `None` when the staff member has no such file; storage failures still surface.
async fn descriptor(
    state: &ServerState,
    staff_id: Uuid,
    which: StaffFile,
) -> Result<Option<FileDescriptor>, ServiceError> {
    let f = match state.staff.file(staff_id, which).await {
        Ok(f) => f,
        Err(ServiceError::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    let segment = match which {
        StaffFile::Photo => "photo",
        StaffFile::Document => "document",
    };
    Ok(Some(FileDescriptor { id: f.id, content_type: f.content_type, url: format!("/api/staff/{staff_id}/{segment}") }))
}

/// GET /api/staff/:id
#[utoipa::path(get, path = "/api/staff/{id}", tag = "staff", params(("id" = Uuid, Path, description = "Staff id")), responses((status = 200, description = "Staff details"), (status = 404, description = "Not found")))]
pub async fn get_staff(
    State(state): State<ServerState>,
    _who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffDetails>, JsonApiError> {
    let staff = state.staff.get(id).await?;
    let photo = descriptor(&state, id, StaffFile::Photo).await?;
    let document_photo = descriptor(&state, id, StaffFile::Document).await?;
    Ok(Json(StaffDetails { staff, photo, document_photo }))
}

/// GET /api/staff/:id/photo
pub async fn get_staff_photo(
    State(state): State<ServerState>,
    _who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Response, JsonApiError> {
    Ok(file_response(state.staff.file(id, StaffFile::Photo).await?))
}

/// GET /api/staff/:id/document
pub async fn get_staff_document(
    State(state): State<ServerState>,
    _who: AuthStaff,
    Path(id): Path<Uuid>,
) -> Result<Response, JsonApiError> {
    Ok(file_response(state.staff.file(id, StaffFile::Document).await?))
}
