//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing required column '{column}' in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Failed to decode sheet '{sheet}': {reason}")]
    Decode { sheet: String, reason: String },

    #[error("Image error: {0}")]
    Image(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl DomainError {
    pub fn missing_column<S: AsRef<str>, C: AsRef<str>>(sheet: S, column: C) -> Self {
        Self::MissingColumn {
            sheet: sheet.as_ref().to_string(),
            column: column.as_ref().to_string(),
        }
    }

    pub fn decode<S: AsRef<str>, R: ToString>(sheet: S, reason: R) -> Self {
        Self::Decode {
            sheet: sheet.as_ref().to_string(),
            reason: reason.to_string(),
        }
    }
}
