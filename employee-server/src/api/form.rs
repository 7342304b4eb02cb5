//! Form-or-JSON body extractor
//!
//! Employee payloads arrive either as `application/json` or as
//! `multipart/form-data` with text fields plus an optional `photo` file part.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
};
use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::services::PhotoUpload;
use crate::utils::AppError;

/// Name of the multipart file part holding the photo
pub const PHOTO_FIELD: &str = "photo";

/// Parsed body plus the photo part, if any
#[derive(Debug)]
pub struct FormOrJson<T> {
    pub data: T,
    pub photo: Option<PhotoUpload>,
}

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            return Ok(Self { data, photo: None });
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        let (fields, photo) = read_multipart(multipart).await?;

        let data = serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::validation(format!("Invalid form data: {}", e)))?;
        Ok(Self { data, photo })
    }
}

/// Collect text fields into a JSON object; blank values are treated as absent
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(Map<String, Value>, Option<PhotoUpload>), AppError> {
    let mut fields = Map::new();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PHOTO_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;

            // browsers send an empty part when no file was chosen
            if data.is_empty() && file_name.as_deref().is_none_or(str::is_empty) {
                continue;
            }
            if photo.is_some() {
                return Err(AppError::validation("Only one photo may be uploaded"));
            }
            photo = Some(PhotoUpload {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        if field.file_name().is_some() {
            return Err(AppError::validation(format!(
                "Unexpected file field '{}'",
                name
            )));
        }

        let value = field.text().await?;
        if !value.trim().is_empty() {
            fields.insert(name, Value::String(value));
        }
    }

    Ok((fields, photo))
}
