//! Credential - email/password row, tear-sheet mode only

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::sheet::Sheet;

/// Credential record joined into the roster when tear-sheet mode is on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub handle: String,
    pub email: String,
    pub password: String,
}

impl Credential {
    /// Decode every row of a credentials sheet. Handle is required.
    pub fn from_sheet(sheet: &Sheet) -> Result<Vec<Credential>, DomainError> {
        let handle = sheet.require_column("Handle")?;
        let email = sheet.column("Email");
        let password = sheet.column("Password");

        Ok(sheet
            .rows()
            .iter()
            .map(|row| Credential {
                handle: Sheet::field(row, Some(handle)).trim().to_string(),
                email: Sheet::field(row, email),
                password: Sheet::field(row, password),
            })
            .collect())
    }
}
