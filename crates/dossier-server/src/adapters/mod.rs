//! Infrastructure Adapters
//!
//! Concrete implementations of the core ports.

pub mod images;

pub use images::HttpImageSource;
