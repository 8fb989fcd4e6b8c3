use clap::Args;
use serde_json::Value;

use zis_risk_core::zis::{self, ZisTrackingInput};

use crate::input;
use crate::RemoteArgs;

/// Arguments for the ZIS fund lifecycle summary
#[derive(Args)]
pub struct ZisSummaryArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_zis_summary(args: ZisSummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let zis_input: ZisTrackingInput = input::read_input(args.input.as_deref(), "the ZIS summary")?;
    let result = zis::summarize_zis(&zis_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Fetch the public fund statistics from the backend.
pub fn run_zis_stats(remote: &RemoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let repo = remote.repository()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let stats = runtime.block_on(repo.zis_stats())?;
    Ok(serde_json::to_value(stats)?)
}
