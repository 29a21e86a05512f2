//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, fix::FixArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "ttk")]
#[command(author, version, about = "Template Toolkit")]
#[command(
    long_about = "A toolkit for validating and auto-repairing hierarchical JSON template trees (object schemas, report categories/actions, export nodes, graphs)."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a template tree against the schema
    Validate(ValidateArgs),

    /// Auto-repair recoverable schema violations in a template tree
    Fix(FixArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for the validate and fix reports
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable styled output
    #[default]
    Text,
    /// The structured report as JSON
    Json,
}
