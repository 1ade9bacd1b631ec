//! Persona - one person as described in the persona sheet
//!
//! All fields are plain strings; missing cells decode to "" so downstream
//! rendering never has to handle a null.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::sheet::Sheet;

/// Persona record keyed by Handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub handle: String,
    pub name: String,
    pub faction: String,
    pub beliefs: String,
    pub tags: String,
    pub bio: String,
    /// Image URL; empty when the sheet has none
    pub image: String,
}

impl Persona {
    /// Decode every row of a persona sheet. Handle is required; the
    /// descriptive columns are optional and default to "".
    pub fn from_sheet(sheet: &Sheet) -> Result<Vec<Persona>, DomainError> {
        let handle = sheet.require_column("Handle")?;
        let name = sheet.column("Name");
        let faction = sheet.column("Faction");
        let beliefs = sheet.column("Beliefs");
        let tags = sheet.column("Tags");
        let bio = sheet.column("Bio");
        let image = sheet.column("Image");

        Ok(sheet
            .rows()
            .iter()
            .map(|row| Persona {
                handle: Sheet::field(row, Some(handle)).trim().to_string(),
                name: Sheet::field(row, name),
                faction: Sheet::field(row, faction),
                beliefs: Sheet::field(row, beliefs),
                tags: Sheet::field(row, tags),
                bio: Sheet::field(row, bio),
                image: Sheet::field(row, image),
            })
            .collect())
    }
}
