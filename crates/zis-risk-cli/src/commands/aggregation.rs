use clap::Args;
use serde_json::{json, Value};

use zis_risk_core::aggregation;
use zis_risk_core::dashboard::DashboardConfig;
use zis_risk_core::taxonomy::{ensure_unique_ids, next_available_id, IdScheme};

use crate::input;

/// Arguments for any command that reads a risk collection
#[derive(Args)]
pub struct RisksInputArgs {
    /// Path to JSON or YAML input file (array of risks, or {"risks": [...]})
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for proposing the next manual risk id
#[derive(Args)]
pub struct NextIdArgs {
    /// Current number of risks; ignored when a collection is supplied
    #[arg(long)]
    pub count: Option<usize>,

    /// Path to JSON or YAML input file with the current collection
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_matrix(args: RisksInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risks = input::read_risks(args.input.as_deref())?;
    let matrix = aggregation::bucket_by_matrix_cell(&risks);
    Ok(json!({
        "result": {
            "total": matrix.total(),
            "tier_counts": matrix.tier_counts(),
            "cells": matrix.cells,
        }
    }))
}

pub fn run_high_priority(args: RisksInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risks = input::read_risks(args.input.as_deref())?;
    Ok(serde_json::to_value(aggregation::high_priority(&risks))?)
}

pub fn run_category_counts(args: RisksInputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risks = input::read_risks(args.input.as_deref())?;
    Ok(serde_json::to_value(aggregation::count_by_category_and_status(&risks))?)
}

pub fn run_kpis(
    args: RisksInputArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let risks = input::read_risks(args.input.as_deref())?;
    Ok(serde_json::to_value(aggregation::build_kpis(&risks, &config.kpi))?)
}

pub fn run_next_id(args: NextIdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (id, count) = match (args.count, args.input.as_deref()) {
        (Some(count), None) => (next_available_id("MN", count + 1, &[]), count),
        (_, path) => {
            let risks = input::read_risks(path)?;
            ensure_unique_ids(&risks)?;
            (next_available_id("MN", risks.len() + 1, &risks), risks.len())
        }
    };
    Ok(json!({
        "result": {
            "id": id,
            "scheme": IdScheme::of(&id),
            "current_count": count,
        }
    }))
}
