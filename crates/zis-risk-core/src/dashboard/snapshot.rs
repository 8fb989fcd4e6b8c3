use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::aggregation::{
    bucket_by_matrix_cell, build_kpis, count_by_category_and_status, high_priority,
    CategoryStatusCounts, Kpi, KpiConfig, RiskMatrix,
};
use crate::early_warning::{
    evaluate_warnings, ratio_gauges, EarlyWarningConfig, GaugeConfig, GaugeReading, RatioReadings,
};
use crate::taxonomy::{ensure_unique_ids, RiskRecord};
use crate::types::{with_metadata, ComputationOutput};
use crate::ZisRiskResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Every tunable of the dashboard derivations. All fields default, so an
/// empty YAML/JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub early_warning: EarlyWarningConfig,
    pub kpi: KpiConfig,
    pub gauges: GaugeConfig,
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInput {
    #[serde(default)]
    pub risks: Vec<RiskRecord>,
    #[serde(default)]
    pub readings: RatioReadings,
    #[serde(default)]
    pub config: DashboardConfig,
}

/// Every derived view of the dashboard, recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_risks: usize,
    pub kpis: Vec<Kpi>,
    /// Ordered early-warning messages; empty means no banner.
    pub warnings: Vec<String>,
    pub high_priority: Vec<RiskRecord>,
    pub category_counts: Vec<CategoryStatusCounts>,
    pub matrix: RiskMatrix,
    pub gauges: Vec<GaugeReading>,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Pure snapshot of the current state. Safe to call repeatedly.
pub fn build_snapshot(
    risks: &[RiskRecord],
    readings: &RatioReadings,
    config: &DashboardConfig,
) -> DashboardSnapshot {
    let snapshot = DashboardSnapshot {
        total_risks: risks.len(),
        kpis: build_kpis(risks, &config.kpi),
        warnings: evaluate_warnings(risks, readings, &config.early_warning),
        high_priority: high_priority(risks).into_iter().cloned().collect(),
        category_counts: count_by_category_and_status(risks),
        matrix: bucket_by_matrix_cell(risks),
        gauges: ratio_gauges(readings, &config.early_warning, &config.gauges),
    };
    debug!(
        total = snapshot.total_risks,
        warnings = snapshot.warnings.len(),
        "dashboard snapshot built"
    );
    snapshot
}

/// Snapshot inside the computation envelope. Rejects collections that break
/// id uniqueness and early-warning configs that repeat a rule.
pub fn build_dashboard(
    input: &DashboardInput,
) -> ZisRiskResult<ComputationOutput<DashboardSnapshot>> {
    let start = Instant::now();
    ensure_unique_ids(&input.risks)?;
    input.config.early_warning.validate()?;

    let snapshot = build_snapshot(&input.risks, &input.readings, &input.config);

    let mut warnings = Vec::new();
    if input.risks.is_empty() {
        warnings.push("Risk collection is empty".to_string());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Risk dashboard: KPIs, severity matrix, category distribution, early warnings",
        &input.config,
        warnings,
        elapsed,
        snapshot,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
