//! Multipart form parsing shared by the staff, customer and order endpoints.

use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;

use service::files::FileUpload;

use crate::errors::JsonApiError;

/// Text fields and file parts of one multipart request, keyed by part name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<FileUpload>>,
}

impl FormData {
    pub async fn read(mut mp: Multipart) -> Result<Self, JsonApiError> {
        let mut form = FormData::default();
        while let Some(field) = mp
            .next_field()
            .await
            .map_err(|e| JsonApiError::new(e.status(), "Invalid Multipart", Some(e.body_text())))?
        {
            let Some(name) = field.name().map(str::to_string) else { continue };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| JsonApiError::new(e.status(), "Invalid Multipart", Some(e.body_text())))?;
            match file_name {
                // an unselected file input arrives as an empty, unnamed part
                Some(f) if f.is_empty() && data.is_empty() => {}
                Some(f) => form.files.entry(name).or_default().push(FileUpload {
                    file_name: Some(f),
                    content_type,
                    data: data.to_vec(),
                }),
                None => {
                    let text = String::from_utf8(data.to_vec())
                        .map_err(|_| JsonApiError::bad_request(format!("field {name} is not valid UTF-8")))?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    pub fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Like [`FormData::text`] but a missing part reads as empty, leaving the
    /// "is required" message to the service.
    pub fn text_or_empty(&mut self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }

    pub fn file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.get_mut(name).and_then(|v| if v.is_empty() { None } else { Some(v.remove(0)) })
    }

    pub fn files(&mut self, name: &str) -> Vec<FileUpload> {
        self.files.remove(name).unwrap_or_default()
    }

    /// Parse a JSON part, sent either as a text field or as a file/blob part.
    pub fn json<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, JsonApiError> {
        let raw = match self.text(name) {
            Some(text) => text.into_bytes(),
            None => self.file(name).map(|f| f.data).ok_or_else(|| JsonApiError::bad_request(format!("missing {name} part")))?,
        };
        serde_json::from_slice(&raw).map_err(|e| JsonApiError::bad_request(format!("invalid {name}: {e}")))
    }

    /// Deserialize all remaining text fields as one flat object.
    pub fn into_fields<T: DeserializeOwned>(self) -> Result<T, JsonApiError> {
        let obj: serde_json::Map<String, serde_json::Value> =
            self.fields.into_iter().map(|(k, v)| (k, serde_json::Value::String(v))).collect();
        serde_json::from_value(serde_json::Value::Object(obj)).map_err(|e| JsonApiError::bad_request(e.to_string()))
    }
}

/// Body accepted either as `multipart/form-data` text fields or as JSON.
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));
        if is_multipart {
            let mp = Multipart::from_request(req, state)
                .await
                .map_err(|e| JsonApiError::new(e.status(), "Invalid Multipart", Some(e.body_text())))?;
            return Ok(FormOrJson(FormData::read(mp).await?.into_fields()?));
        }
        let Json(v) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::new(e.status(), "Invalid Body", Some(e.body_text())))?;
        Ok(FormOrJson(v))
    }
}
