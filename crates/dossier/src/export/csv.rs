//! CSV Export
//!
//! Serializes the currently displayed (possibly filtered) roster verbatim:
//! header row first, one record per expanded row, UTF-8. Re-parsing the
//! output reproduces the table exactly.

use crate::domain::{DomainError, Roster};

/// Serialize the roster to CSV bytes
pub fn to_csv(roster: &Roster) -> Result<Vec<u8>, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(roster.columns())
        .map_err(|e| DomainError::Export(e.to_string()))?;

    for row in &roster.rows {
        writer
            .write_record(roster.values(row))
            .map_err(|e| DomainError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| DomainError::Export(e.to_string()))
}
