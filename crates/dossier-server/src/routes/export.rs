//! Export Routes - CSV and PDF downloads
//!
//! Each download re-submits the same multipart form the render endpoint
//! takes; the roster is rebuilt from scratch, so nothing is held between
//! requests.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use dossier::export::{csv, pdf};

use crate::routes::{assemble_roster, read_upload, unprocessable};
use crate::AppState;

/// Download the displayed roster as CSV
#[utoipa::path(
    post,
    path = "/match/export/csv",
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 400, description = "Missing or malformed upload"),
        (status = 422, description = "Sheets could not be decoded or joined")
    ),
    tag = "Export"
)]
pub async fn export_csv(multipart: Multipart) -> Result<Response, (StatusCode, String)> {
    let upload = read_upload(multipart).await?;
    let roster = assemble_roster(&upload).map_err(unprocessable)?;

    if roster.tear_sheet {
        tracing::warn!("Tear-sheet CSV export includes plaintext credential columns");
    }

    let bytes = csv::to_csv(&roster)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(rows = roster.rows.len(), bytes = bytes.len(), "CSV export");

    Ok(attachment("text/csv", "expanded_data.csv", bytes))
}

/// Download the displayed roster as a paginated PDF
#[utoipa::path(
    post,
    path = "/match/export/pdf",
    responses(
        (status = 200, description = "PDF attachment", body = String, content_type = "application/pdf"),
        (status = 400, description = "Missing or malformed upload"),
        (status = 422, description = "Sheets could not be decoded or joined")
    ),
    tag = "Export"
)]
pub async fn export_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let upload = read_upload(multipart).await?;
    let roster = assemble_roster(&upload).map_err(unprocessable)?;

    if roster.tear_sheet {
        tracing::warn!("Tear-sheet PDF export includes plaintext credential columns");
    }

    let bytes = pdf::to_pdf(&roster, state.images.as_ref())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(rows = roster.rows.len(), bytes = bytes.len(), "PDF export");

    Ok(attachment("application/pdf", "expanded_data.pdf", bytes))
}

fn attachment(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/match/export/csv", post(export_csv))
        .route("/match/export/pdf", post(export_pdf))
}
