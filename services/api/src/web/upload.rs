//! services/api/src/web/upload.rs
//!
//! Handler for the single-file upload endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Json,
};

use all_islam_core::domain::StoredFile;

use crate::web::error::WebError;
use crate::web::state::AppState;

/// Accept one file in a multipart request and persist it.
///
/// The file must arrive in a part named `file`; other parts are skipped.
/// Nothing is written to disk when the part is missing.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content_type = "multipart/form-data", description = "A single `file` part."),
    responses(
        (status = 200, description = "The stored file's URL and original name", body = StoredFile),
        (status = 400, description = "No file part present")
    )
)]
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<StoredFile>, WebError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| WebError::BadRequest(format!("Failed to read file part: {}", e)))?;

        let stored = state.files.save(&file_name, &data).await?;
        return Ok(Json(stored));
    }

    Err(WebError::BadRequest("No file uploaded".to_string()))
}
