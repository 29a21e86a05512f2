//! `ttk fix` command - Auto-repair recoverable schema violations

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;
use crate::core::Layout;
use crate::schema::{FixReport, TemplateFixer};

#[derive(clap::Args, Debug)]
pub struct FixArgs {
    /// Template tree root
    #[arg(default_value = ".", env = "TTK_TEMPLATES_DIR")]
    pub root: PathBuf,

    /// Report intended changes without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: FixArgs) -> Result<()> {
    let layout = Layout::open(&args.root).map_err(|e| miette::miette!("{}", e))?;
    let report = TemplateFixer::new(&layout, args.dry_run).run();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Text => render(&layout, &report, args.dry_run),
    }

    Ok(())
}

fn render(layout: &Layout, report: &FixReport, dry_run: bool) {
    println!(
        "{} Fixing templates in: {}",
        style("→").blue(),
        layout.root().display()
    );
    if dry_run {
        println!("  {}", style("(dry run - no files will be written)").dim());
    }

    // One processing line per file, its fixes indented beneath it.
    let mut current_file: Option<&str> = None;
    for event in &report.events {
        if current_file != Some(event.file.as_str()) {
            println!("\n{}", style(&event.file).cyan());
            current_file = Some(event.file.as_str());
        }
        println!("  {} {}", style("Fixed:").green(), event.detail);
    }

    if !report.failures.is_empty() {
        println!();
        for failure in &report.failures {
            println!(
                "  {} {} - {}",
                style("✗").red(),
                style(&failure.file).cyan(),
                failure.message
            );
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Fix Summary").bold());
    println!("{}", style("─".repeat(60)).dim());

    let mut builder = Builder::default();
    builder.push_record(["Files processed".to_string(), report.files_processed.to_string()]);
    builder.push_record(["Files modified".to_string(), report.files_modified().to_string()]);
    builder.push_record(["Fixes applied".to_string(), report.fixes_applied().to_string()]);
    println!("{}", builder.build().with(Style::markdown()));
    println!();

    if dry_run {
        println!(
            "  {}",
            style("(dry run - run without --dry-run to apply changes)").dim()
        );
    } else if report.fixes_applied() > 0 {
        println!("{} All fixes have been applied!", style("✓").green().bold());
    } else {
        println!("{} Nothing to fix.", style("✓").green().bold());
    }
}
