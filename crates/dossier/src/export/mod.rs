//! Export Layer
//!
//! Serializes the displayed roster: CSV verbatim, PDF mirroring the
//! on-screen grouping.

pub mod csv;
pub mod pdf;
