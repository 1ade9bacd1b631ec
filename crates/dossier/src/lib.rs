//! Dossier Domain Library
//!
//! Core types and logic for the persona/permissions matcher.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and errors
//!   - `entities/`: Persona, PermissionGrant, Credential, Roster
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `images/`: Thumbnail fetching interface
//!
//! - **Sheet** (`sheet/`): Spreadsheet decoding (XLSX and CSV uploads)
//!
//! - **Services** (`services/`): The merge pipeline
//!   (join, normalize, explode, filter, group)
//!
//! - **Export** (`export/`): CSV and paginated PDF serialization
//!
//! Everything operates on in-memory tables; nothing here persists state
//! beyond one upload/render/export cycle.

pub mod domain;
pub mod export;
pub mod ports;
pub mod services;
pub mod sheet;

// Re-export commonly used types
pub use domain::{
    Credential, DomainError, MatchOptions, Persona, PermissionGrant, Roster, RosterRow,
};
pub use ports::ImageSource;
pub use services::build_roster;
pub use sheet::Sheet;
