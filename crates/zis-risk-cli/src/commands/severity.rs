use clap::Args;
use serde_json::Value;

use zis_risk_core::severity::{self, ClassifyInput};
use zis_risk_core::{RiskImpact, RiskLikelihood};

use crate::input;

/// Arguments for classifying one impact/likelihood pair
#[derive(Args)]
pub struct ClassifyArgs {
    /// Impact level (Low, Medium, High, Critical)
    #[arg(long)]
    pub impact: Option<RiskImpact>,

    /// Likelihood level (Low, Medium, High)
    #[arg(long)]
    pub likelihood: Option<RiskLikelihood>,

    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let classify_input = match (args.impact, args.likelihood) {
        (Some(impact), Some(likelihood)) => ClassifyInput { impact, likelihood },
        (None, None) => input::read_input(args.input.as_deref(), "classification")?,
        _ => return Err("--impact and --likelihood must be given together".into()),
    };
    let result = severity::classify_pair(&classify_input)?;
    Ok(serde_json::to_value(result)?)
}
