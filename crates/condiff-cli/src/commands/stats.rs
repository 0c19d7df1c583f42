//! Stats command
//!
//! Usage: condiff stats <ROOT> [--config <FILE>]

use clap::Args;
use condiff_core::aggregate_statistics;
use condiff_core::extract::ContractExtractor;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Tree to summarize
    pub root: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute stats command
pub fn execute(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = super::load_settings(args.config.as_deref())?;
    if !args.root.is_dir() {
        return Err(format!("Not a directory: {}", args.root.display()).into());
    }

    let records = settings.extractor().extract_from_folder(&args.root)?;
    let statistics = aggregate_statistics(&records);

    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}
