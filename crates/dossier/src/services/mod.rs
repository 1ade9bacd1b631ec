//! Services Layer
//!
//! The merge pipeline: join, normalize, explode, filter.

pub mod merge;

pub use merge::build_roster;
