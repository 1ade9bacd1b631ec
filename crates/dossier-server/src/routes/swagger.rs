//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Matcher endpoints
        super::matcher::index,
        super::matcher::match_roster,
        // Export endpoints
        super::export::export_csv,
        super::export::export_pdf,
    ),
    tags(
        (name = "Matcher", description = "Upload and grouped render"),
        (name = "Export", description = "CSV and PDF downloads")
    ),
    info(
        title = "Dossier API",
        description = "Persona/permissions matcher: join, expand, render, export"
    )
)]
pub struct ApiDoc;
