//! Handler for CSV bulk import.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use opencrochet_core::import::ImportOutcome;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the CSV document.
const FILE_FIELD: &str = "file";

/// Keep the body-limit rejection distinct from malformed multipart input.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// POST /api/v1/imports
///
/// Accept a multipart upload with a `file` field, run it through the import
/// pipeline and return the persisted tutorials. Other fields are ignored.
pub async fn import_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImportOutcome>>)> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        upload = Some((file_name, data));
        break;
    }

    let Some((file_name, data)) = upload else {
        return Err(AppError::BadRequest(format!(
            "Missing '{FILE_FIELD}' field in multipart upload"
        )));
    };

    tracing::info!(file_name = %file_name, bytes = data.len(), "Received CSV import");

    let outcome = state.importer.run_file(&file_name, &data).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}
