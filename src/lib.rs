//! TTK: Template Toolkit
//!
//! Validates and auto-repairs hierarchical JSON template trees
//! (object property schemas, report categories/actions, export nodes,
//! graphs) against a hand-coded schema.

pub mod cli;
pub mod core;
pub mod schema;
