//! Ports Layer
//!
//! Abstract interfaces implemented by infrastructure adapters.

pub mod images;

pub use images::ImageSource;
