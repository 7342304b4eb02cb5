//! Photo Store
//!
//! Validates uploaded employee photos, normalizes them to JPEG and keeps them
//! under `<work_dir>/uploads/`. Records reference a photo as `uploads/<file>`.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use uuid::Uuid;

use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// Prefix of stored photo references, also the public URL segment
pub const PHOTO_PREFIX: &str = "uploads";

/// Supported image extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored photos
const JPEG_QUALITY: u8 = 85;

/// A photo file part taken from a multipart request
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    /// Create the upload directory if missing
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {}", e)))
    }

    /// Cheap checks before decoding: size, declared type, extension
    pub fn validate(&self, upload: &PhotoUpload) -> AppResult<()> {
        if upload.data.is_empty() {
            return Err(AppError::validation("Empty file provided"));
        }

        if upload.data.len() > self.max_bytes {
            return Err(AppError::validation(format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                self.max_bytes,
                self.max_bytes / 1024 / 1024
            )));
        }

        if let Some(ct) = upload.content_type.as_deref()
            && !ct.starts_with("image/")
        {
            return Err(AppError::validation("Only image files are allowed"));
        }

        let file_name = upload
            .file_name
            .as_deref()
            .ok_or_else(|| AppError::validation("No filename provided in photo field"))?;
        let ext = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {}", file_name))
            })?;
        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            )));
        }

        Ok(())
    }

    /// Validate, re-encode and persist a photo; returns its reference
    pub async fn save(&self, upload: PhotoUpload) -> AppResult<String> {
        self.validate(&upload)?;

        let data = upload.data;
        let encoded = tokio::task::spawn_blocking(move || encode_jpeg(&data))
            .await
            .map_err(|e| AppError::internal(format!("Image task failed: {}", e)))??;

        self.ensure_dir().await?;

        let id = Uuid::new_v4().simple().to_string();
        let filename = format!("photo-{}-{}.jpg", now_millis(), &id[..8]);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, &encoded)
            .await
            .map_err(|e| AppError::internal(format!("Failed to save photo: {}", e)))?;

        tracing::info!(
            original_name = ?upload.file_name,
            file = %filename,
            size = encoded.len(),
            "Photo stored"
        );

        Ok(format!("{}/{}", PHOTO_PREFIX, filename))
    }

    /// Best-effort removal of a stored photo
    pub async fn remove(&self, reference: &str) {
        let Some(filename) = file_name_of(reference) else {
            tracing::warn!(reference, "Refusing to remove photo with unexpected reference");
            return;
        };

        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => tracing::info!(file = %filename, "Photo removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(file = %filename, error = %e, "Failed to remove photo"),
        }
    }

    /// Read a stored photo by bare file name
    pub async fn read(&self, filename: &str) -> AppResult<(Vec<u8>, String)> {
        if !is_safe_file_name(filename) {
            return Err(AppError::validation("Invalid filename"));
        }

        let content = tokio::fs::read(self.dir.join(filename))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AppError::not_found("File not found"),
                _ => AppError::internal(format!("Failed to read photo: {}", e)),
            })?;

        let mime = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();
        Ok((content, mime))
    }
}

/// Path traversal guard
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

/// Extract the bare file name from an `uploads/<file>` reference
fn file_name_of(reference: &str) -> Option<&str> {
    let name = reference
        .strip_prefix(PHOTO_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))?;
    is_safe_file_name(name).then_some(name)
}

/// Decode any supported format and re-encode as JPEG
fn encode_jpeg(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}
