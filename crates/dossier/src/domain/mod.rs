//! Domain Layer
//!
//! Pure business entities and error types, free of web and I/O concerns.

pub mod entities;
pub mod errors;

pub use entities::{Credential, MatchOptions, Persona, PermissionGrant, Roster, RosterRow};
pub use errors::DomainError;
