//! Uploaded photo routes
//!
//! Stored photos are public, referenced as `uploads/<file>` in employee records.

use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::header;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Serve a stored photo
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (content, mime) = state.photos.read(&filename).await?;
    tracing::debug!(file = %filename, size = content.len(), "Serving photo");

    Ok((
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        content,
    ))
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{filename}", get(serve_uploaded_file))
}
