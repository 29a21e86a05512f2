//! Core module - fundamental types and utilities

pub mod document;
pub mod layout;

pub use document::{load_document, write_document, DocumentError};
pub use layout::{Layout, LayoutError, Zone};
