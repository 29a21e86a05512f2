//! `ttk validate` command - Validate a template tree against the schema

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;
use crate::core::Layout;
use crate::schema::{Issue, TemplateValidator, ValidationReport};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Template tree root
    #[arg(default_value = ".", env = "TTK_TEMPLATES_DIR")]
    pub root: PathBuf,

    /// Strict mode - warnings become errors
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let layout = Layout::open(&args.root).map_err(|e| miette::miette!("{}", e))?;
    let report = TemplateValidator::new(&layout).run();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Text => render(&layout, &report),
    }

    if !report.passed() {
        return Err(miette::miette!(
            "Validation failed with {} error(s)",
            report.errors.len()
        ));
    }
    if args.strict && !report.warnings.is_empty() {
        return Err(miette::miette!(
            "Validation failed: {} warning(s) in strict mode",
            report.warnings.len()
        ));
    }

    if args.format == OutputFormat::Text {
        println!("{} Validation passed!", style("✓").green().bold());
    }
    Ok(())
}

fn render(layout: &Layout, report: &ValidationReport) {
    println!(
        "{} Validating templates in: {}\n",
        style("→").blue(),
        layout.root().display()
    );

    if !report.warnings.is_empty() {
        println!("{}", style("Warnings:").yellow().bold());
        for issue in &report.warnings {
            print_issue(issue, style("!").yellow());
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("{}", style("Errors:").red().bold());
        for issue in &report.errors {
            print_issue(issue, style("✗").red());
        }
        println!();
    }

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());

    let mut builder = Builder::default();
    builder.push_record(["Errors".to_string(), report.errors.len().to_string()]);
    builder.push_record(["Warnings".to_string(), report.warnings.len().to_string()]);
    println!("{}", builder.build().with(Style::markdown()));
    println!();
}

fn print_issue(issue: &Issue, icon: console::StyledObject<&str>) {
    println!("  {} {} - {}", icon, style(&issue.file).cyan(), issue.message);
}
