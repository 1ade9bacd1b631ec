//! Routes
//!
//! Upload parsing shared by the render and export endpoints, plus the
//! per-surface routers.

pub mod export;
pub mod matcher;
pub mod swagger;

use axum::extract::Multipart;
use axum::http::StatusCode;

use dossier::{
    build_roster, Credential, DomainError, MatchOptions, Persona, PermissionGrant, Roster, Sheet,
};

/// One upload form submission: the two required sheets, the optional
/// credentials sheet, and the match options.
pub struct MatchUpload {
    pub personas: Vec<u8>,
    pub permissions: Vec<u8>,
    pub credentials: Option<Vec<u8>>,
    pub options: MatchOptions,
}

/// Drain the multipart stream into a `MatchUpload`. Unknown fields are
/// ignored; the two required sheets must be present and non-empty.
pub async fn read_upload(mut multipart: Multipart) -> Result<MatchUpload, (StatusCode, String)> {
    let mut personas: Option<Vec<u8>> = None;
    let mut permissions: Option<Vec<u8>> = None;
    let mut credentials: Option<Vec<u8>> = None;
    let mut options = MatchOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid upload: {e}")))?;

        match name.as_str() {
            "personas" => personas = Some(data.to_vec()),
            "permissions" => permissions = Some(data.to_vec()),
            // an empty file input still submits an empty part
            "credentials" if !data.is_empty() => credentials = Some(data.to_vec()),
            "filter" => {
                let text = String::from_utf8_lossy(&data).trim().to_string();
                if !text.is_empty() {
                    options.permission_filter = Some(text);
                }
            }
            "tear_sheet" => options.tear_sheet = true,
            _ => {}
        }
    }

    let personas = personas
        .filter(|b| !b.is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "Missing persona sheet".to_string()))?;
    let permissions = permissions.filter(|b| !b.is_empty()).ok_or((
        StatusCode::BAD_REQUEST,
        "Missing permissions sheet".to_string(),
    ))?;

    Ok(MatchUpload {
        personas,
        permissions,
        credentials,
        options,
    })
}

/// Decode the uploaded sheets and run the merge pipeline.
pub fn assemble_roster(upload: &MatchUpload) -> Result<Roster, DomainError> {
    let personas = Persona::from_sheet(&Sheet::from_bytes("personas", &upload.personas)?)?;
    let grants =
        PermissionGrant::from_sheet(&Sheet::from_bytes("permissions", &upload.permissions)?)?;

    let credentials = match (&upload.credentials, upload.options.tear_sheet) {
        (Some(bytes), true) => Some(Credential::from_sheet(&Sheet::from_bytes(
            "credentials",
            bytes,
        )?)?),
        _ => None,
    };

    Ok(build_roster(
        &personas,
        &grants,
        credentials.as_deref(),
        &upload.options,
    ))
}

/// Map pipeline failures onto a client-visible error. Malformed input is
/// the user's to correct, so the text passes through unchanged.
pub fn unprocessable(e: DomainError) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}
