//! Schema system - the template rule set and the two engines driven by it

pub mod fixer;
pub mod rules;
pub mod validator;

pub use fixer::{FixEvent, FixReport, TemplateFixer};
pub use validator::{Issue, TemplateValidator, ValidationReport};
