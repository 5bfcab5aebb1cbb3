//! Output formatting utilities

use autoscaler_lib::{Bounds, ResizeOutcome};
use clap::ValueEnum;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Row of the before/after bounds table
#[derive(Tabled)]
struct BoundRow {
    #[tabled(rename = "Bound")]
    bound: &'static str,
    #[tabled(rename = "Before")]
    before: String,
    #[tabled(rename = "After")]
    after: String,
}

fn bound_rows(before: Bounds, after: Bounds) -> Vec<BoundRow> {
    vec![
        BoundRow {
            bound: "minNumReplicas",
            before: before.min.to_string(),
            after: color_change(before.min, after.min),
        },
        BoundRow {
            bound: "maxNumReplicas",
            before: before.max.to_string(),
            after: color_change(before.max, after.max),
        },
    ]
}

/// Render the before/after bounds as a table
pub fn bounds_table(before: Bounds, after: Bounds) -> String {
    Table::new(bound_rows(before, after))
        .with(Style::rounded())
        .to_string()
}

/// Print the result of a resize
pub fn print_outcome(outcome: &ResizeOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(outcome)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("Autoscaler: {}", outcome.target.to_string().cyan());
            println!("{}", bounds_table(outcome.before, outcome.after));

            if !outcome.changed() {
                print_info("Bounds unchanged");
            }
            if outcome.applied {
                print_success("Update is completed.");
            } else {
                print_warning("Dry-run mode - no changes applied");
            }
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Highlight a bound that the merge changed
fn color_change(before: i64, after: i64) -> String {
    if before == after {
        after.to_string()
    } else {
        after.to_string().green().bold().to_string()
    }
}
