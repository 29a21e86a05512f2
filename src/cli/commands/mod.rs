//! CLI command implementations

pub mod completions;
pub mod fix;
pub mod validate;
