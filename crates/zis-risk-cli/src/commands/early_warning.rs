use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

use zis_risk_core::dashboard::DashboardConfig;
use zis_risk_core::early_warning::{
    self, EarlyWarningInput, RatioFeed, RatioReadings, SimulatedRatioFeed,
};
use zis_risk_core::RiskRecord;

use crate::input;

/// Arguments for early-warning evaluation
#[derive(Args)]
pub struct WarningsArgs {
    /// Path to JSON or YAML input file ({"risks": [...], "readings": {...}})
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the RHA/ACR gauges
#[derive(Args)]
pub struct GaugesArgs {
    /// Amil Rights Ratio, percent
    #[arg(long)]
    pub rha: Decimal,

    /// Idle Cash Ratio, percent
    #[arg(long)]
    pub acr: Decimal,
}

/// Arguments for watching the simulated ratio feed
#[derive(Args)]
pub struct MonitorArgs {
    /// Number of readings to take
    #[arg(long, default_value = "5")]
    pub ticks: u32,

    /// Delay between readings in milliseconds (the dashboard polls every 4000)
    #[arg(long, default_value = "0")]
    pub interval_ms: u64,

    /// Seed for a reproducible walk
    #[arg(long)]
    pub seed: Option<u64>,

    /// Starting RHA, percent
    #[arg(long, default_value = "14.8")]
    pub rha: Decimal,

    /// Starting ACR, percent
    #[arg(long, default_value = "8.5")]
    pub acr: Decimal,

    /// Optional risk collection evaluated alongside the ratios
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_warnings(
    args: WarningsArgs,
    config: &DashboardConfig,
    config_given: bool,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut ew_input: EarlyWarningInput = input::read_input(args.input.as_deref(), "early warnings")?;
    if config_given {
        ew_input.config = config.early_warning.clone();
    }
    let result = early_warning::assess_early_warnings(&ew_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_gauges(
    args: GaugesArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let readings = RatioReadings {
        rha: args.rha,
        acr: args.acr,
    };
    let gauges = early_warning::ratio_gauges(&readings, &config.early_warning, &config.gauges);
    Ok(serde_json::to_value(gauges)?)
}

pub fn run_monitor(
    args: MonitorArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let risks: Vec<RiskRecord> = match args.input.as_deref() {
        Some(path) => input::read_risks(Some(path))?,
        None => Vec::new(),
    };
    let mut feed = SimulatedRatioFeed::starting_at(
        RatioReadings {
            rha: args.rha,
            acr: args.acr,
        },
        args.seed,
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let ticks = runtime.block_on(async {
        let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));
        let mut ticks = Vec::with_capacity(args.ticks as usize);
        for tick in 1..=args.ticks {
            ticker.tick().await;
            let readings = feed.next_reading();
            let warnings =
                early_warning::evaluate_warnings(&risks, &readings, &config.early_warning);
            let gauges =
                early_warning::ratio_gauges(&readings, &config.early_warning, &config.gauges);
            info!(tick, rha = %readings.rha, acr = %readings.acr, "ratio reading");
            ticks.push(json!({
                "tick": tick,
                "rha": gauges[0].value,
                "rha_zone": gauges[0].zone,
                "acr": gauges[1].value,
                "acr_zone": gauges[1].zone,
                "warnings": warnings,
            }));
        }
        ticks
    });
    Ok(Value::Array(ticks))
}
