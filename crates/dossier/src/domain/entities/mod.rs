//! Domain Entities
//!
//! - Persona: one person as described in the persona sheet
//! - PermissionGrant: one row of the permissions sheet (comma-separated list)
//! - Credential: email/password row, tear-sheet mode only
//! - Roster / RosterRow: the expanded (handle, single permission) table

mod credential;
mod grant;
mod persona;
mod roster;

pub use credential::*;
pub use grant::*;
pub use persona::*;
pub use roster::*;
