//! Compare command
//!
//! Usage: condiff compare <THIS> <OTHER> [--export <DIR>] [--json]

use clap::Args;
use condiff_core::diff::{compare_folders, render_human_summary};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Earlier version of the tree
    pub this: PathBuf,

    /// Later version of the tree
    pub other: PathBuf,

    /// Report matched files even when nothing changed
    #[arg(long)]
    pub report_equal: bool,

    /// Report structural changes that do not touch contracts
    #[arg(long)]
    pub report_non_contract_changes: bool,

    /// Stream one JSON document per changed file into this directory
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Write exported documents without indentation
    #[arg(long)]
    pub compact: bool,

    /// Print the folder report as JSON instead of a Markdown summary
    #[arg(long)]
    pub json: bool,

    /// Settings file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = super::load_settings(args.config.as_deref())?;
    settings.report_equal |= args.report_equal;
    settings.report_non_contract_changes |= args.report_non_contract_changes;
    if args.compact {
        settings.pretty_print = false;
    }

    let options = settings.compare_options(args.export);
    let report = compare_folders(&args.this, &args.other, &options, &settings.extractor())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_human_summary(&report));
    }

    if let Some(summary) = report.export {
        tracing::info!(
            files_written = summary.files_written,
            files_failed = summary.files_failed,
            "export finished"
        );
        if summary.files_failed > 0 && !summary.succeeded() {
            return Err(format!(
                "none of {} report documents could be written",
                summary.files_failed
            )
            .into());
        }
    }

    Ok(())
}
