//! PermissionGrant - one row of the permissions sheet

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::sheet::Sheet;

/// One permissions row: a handle and its comma-separated permission list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub handle: String,
    /// Raw comma-separated list as uploaded, e.g. "read, write"
    pub permissions: String,
}

impl PermissionGrant {
    /// Decode every row of a permissions sheet. Both columns are required.
    pub fn from_sheet(sheet: &Sheet) -> Result<Vec<PermissionGrant>, DomainError> {
        let handle = sheet.require_column("Handle")?;
        let permissions = sheet.require_column("Permissions")?;

        Ok(sheet
            .rows()
            .iter()
            .map(|row| PermissionGrant {
                handle: Sheet::field(row, Some(handle)).trim().to_string(),
                permissions: Sheet::field(row, Some(permissions)),
            })
            .collect())
    }

    /// Split the list on ',' and trim each name. A list of k names yields
    /// exactly k entries; an empty list yields one empty name (this is what
    /// exploding a split of "" produces, and the invariant downstream
    /// counts on).
    pub fn split_permissions(&self) -> Vec<String> {
        self.permissions
            .split(',')
            .map(|p| p.trim().to_string())
            .collect()
    }
}
