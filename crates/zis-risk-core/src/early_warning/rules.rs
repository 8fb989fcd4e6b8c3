use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::debug;

use super::feed::RatioReadings;
use crate::error::ZisRiskError;
use crate::taxonomy::RiskRecord;
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::ZisRiskResult;

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One early-warning rule. Each rule reads the current state and emits at
/// most one message; rules never depend on one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningRule {
    /// Any Critical-impact risk still Open.
    OpenCriticalRisk,
    /// Amil Rights Ratio above its good threshold.
    AmilRightsRatio,
    /// Idle Cash Ratio above its good threshold.
    IdleCashRatio,
}

impl WarningRule {
    /// Evaluation order of the default rule set.
    pub const DEFAULT_ORDER: [WarningRule; 3] = [
        WarningRule::OpenCriticalRisk,
        WarningRule::AmilRightsRatio,
        WarningRule::IdleCashRatio,
    ];

    pub fn evaluate(
        &self,
        risks: &[RiskRecord],
        readings: &RatioReadings,
        config: &EarlyWarningConfig,
    ) -> Option<String> {
        match self {
            WarningRule::OpenCriticalRisk => risks.iter().any(RiskRecord::is_open_critical).then(|| {
                "Terdapat risiko 'Kritis' yang masih berstatus 'Open'. Perlu penanganan segera."
                    .to_string()
            }),
            WarningRule::AmilRightsRatio => (readings.rha > config.rha_good_threshold).then(|| {
                format!(
                    "Rasio Hak Amil (RHA) ({}%) melebihi batas ideal ({}%).",
                    one_decimal(readings.rha),
                    config.rha_good_threshold.normalize()
                )
            }),
            WarningRule::IdleCashRatio => (readings.acr > config.acr_good_threshold).then(|| {
                format!(
                    "Saldo Kas Mengendap (ACR) ({}%) melebihi batas ideal ({}%).",
                    one_decimal(readings.acr),
                    config.acr_good_threshold.normalize()
                )
            }),
        }
    }
}

fn one_decimal(value: Decimal) -> String {
    format!(
        "{:.1}",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarlyWarningConfig {
    /// RHA above this percentage raises a warning.
    pub rha_good_threshold: Percent,
    /// ACR above this percentage raises a warning.
    pub acr_good_threshold: Percent,
    /// Rules in evaluation order. New rules are appended.
    pub rules: Vec<WarningRule>,
}

impl Default for EarlyWarningConfig {
    fn default() -> Self {
        EarlyWarningConfig {
            rha_good_threshold: dec!(12.5),
            acr_good_threshold: dec!(10),
            rules: WarningRule::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl EarlyWarningConfig {
    /// Thresholds must be percentages and each rule may appear once.
    pub fn validate(&self) -> ZisRiskResult<()> {
        validate_percentage("config.rha_good_threshold", self.rha_good_threshold)?;
        validate_percentage("config.acr_good_threshold", self.acr_good_threshold)?;
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(*rule) {
                return Err(ZisRiskError::InvalidInput {
                    field: "config.rules".to_string(),
                    reason: format!("{:?} is listed more than once", rule),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// A fired rule with its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyWarning {
    pub rule: WarningRule,
    pub message: String,
}

/// Run the configured rules in order, keeping the ones that fire. A rule
/// listed twice is evaluated at its first position only.
pub fn evaluate_rules(
    risks: &[RiskRecord],
    readings: &RatioReadings,
    config: &EarlyWarningConfig,
) -> Vec<EarlyWarning> {
    let mut seen = HashSet::new();
    config
        .rules
        .iter()
        .filter(|rule| seen.insert(**rule))
        .filter_map(|rule| {
            rule.evaluate(risks, readings, config).map(|message| {
                debug!(?rule, %message, "early warning fired");
                EarlyWarning {
                    rule: *rule,
                    message,
                }
            })
        })
        .collect()
}

/// Ordered warning messages. Empty means no banner.
pub fn evaluate_warnings(
    risks: &[RiskRecord],
    readings: &RatioReadings,
    config: &EarlyWarningConfig,
) -> Vec<String> {
    evaluate_rules(risks, readings, config)
        .into_iter()
        .map(|w| w.message)
        .collect()
}

/// Input for a standalone early-warning assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyWarningInput {
    #[serde(default)]
    pub risks: Vec<RiskRecord>,
    #[serde(default)]
    pub readings: RatioReadings,
    #[serde(default)]
    pub config: EarlyWarningConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyWarningOutput {
    pub active: bool,
    pub warnings: Vec<EarlyWarning>,
    pub messages: Vec<String>,
}

fn validate_percentage(field: &str, value: Decimal) -> ZisRiskResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(ZisRiskError::InvalidInput {
            field: field.to_string(),
            reason: format!("must be a percentage between 0 and 100, got {}", value),
        });
    }
    Ok(())
}

/// Evaluate the rule set inside the computation envelope, validating that
/// readings and thresholds are percentages.
pub fn assess_early_warnings(
    input: &EarlyWarningInput,
) -> ZisRiskResult<ComputationOutput<EarlyWarningOutput>> {
    let start = Instant::now();

    validate_percentage("readings.rha", input.readings.rha)?;
    validate_percentage("readings.acr", input.readings.acr)?;
    input.config.validate()?;

    let mut warnings = Vec::new();
    if input.config.rules.is_empty() {
        warnings.push("No early-warning rules configured".to_string());
    }

    let fired = evaluate_rules(&input.risks, &input.readings, &input.config);
    let output = EarlyWarningOutput {
        active: !fired.is_empty(),
        messages: fired.iter().map(|w| w.message.clone()).collect(),
        warnings: fired,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Ordered threshold rules over open-critical risks, RHA and ACR",
        &input.config,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
