//! Matcher Routes - upload form and the grouped render

use axum::{
    extract::Multipart,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::routes::{assemble_roster, read_upload, unprocessable};
use crate::views;
use crate::AppState;

/// Upload form
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Upload form", body = String, content_type = "text/html")
    ),
    tag = "Matcher"
)]
pub async fn index() -> Html<String> {
    Html(views::index_page())
}

/// Match the uploaded sheets and render the grouped roster page
#[utoipa::path(
    post,
    path = "/match",
    responses(
        (status = 200, description = "Grouped roster page", body = String, content_type = "text/html"),
        (status = 400, description = "Missing or malformed upload"),
        (status = 422, description = "Sheets could not be decoded or joined")
    ),
    tag = "Matcher"
)]
pub async fn match_roster(
    multipart: Multipart,
) -> Result<Html<String>, (axum::http::StatusCode, String)> {
    let upload = read_upload(multipart).await?;
    let roster = assemble_roster(&upload).map_err(unprocessable)?;

    tracing::info!(
        rows = roster.rows.len(),
        tear_sheet = roster.tear_sheet,
        "Rendered roster"
    );

    Ok(Html(views::roster_page(&roster)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/match", post(match_roster))
}
