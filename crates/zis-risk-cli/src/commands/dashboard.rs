use clap::Args;
use serde_json::Value;

use zis_risk_core::dashboard::{self, DashboardConfig, DashboardInput};

use crate::input;

/// Arguments for the full dashboard snapshot
#[derive(Args)]
pub struct DashboardArgs {
    /// Path to JSON or YAML input file ({"risks": [...], "readings": {...}, "config": {...}})
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_dashboard(
    args: DashboardArgs,
    config: &DashboardConfig,
    config_given: bool,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut dash_input: DashboardInput = input::read_input(args.input.as_deref(), "the dashboard")?;
    if config_given {
        dash_input.config = config.clone();
    }
    let result = dashboard::build_dashboard(&dash_input)?;
    Ok(serde_json::to_value(result)?)
}
