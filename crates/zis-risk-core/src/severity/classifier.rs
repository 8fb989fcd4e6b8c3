use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::taxonomy::{RiskImpact, RiskLikelihood};
use crate::types::{with_metadata, ComputationOutput};
use crate::ZisRiskResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tier of an (impact, likelihood) cell, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    Severe,
    High,
    Moderate,
    Low,
    Minor,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 5] = [
        SeverityTier::Severe,
        SeverityTier::High,
        SeverityTier::Moderate,
        SeverityTier::Low,
        SeverityTier::Minor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Severe => "Severe",
            SeverityTier::High => "High",
            SeverityTier::Moderate => "Moderate",
            SeverityTier::Low => "Low",
            SeverityTier::Minor => "Minor",
        }
    }

    /// Palette token for the matrix cell (red → orange → yellow → green shades).
    pub fn color_token(&self) -> &'static str {
        match self {
            SeverityTier::Severe => "red-700",
            SeverityTier::High => "orange-600",
            SeverityTier::Moderate => "yellow-500",
            SeverityTier::Low => "green-600",
            SeverityTier::Minor => "green-800",
        }
    }
}

/// Classifier output: the tier plus its presentation tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCellStyle {
    pub tier: SeverityTier,
    pub label: String,
    pub color: String,
}

impl From<SeverityTier> for SeverityCellStyle {
    fn from(tier: SeverityTier) -> Self {
        SeverityCellStyle {
            tier,
            label: tier.label().to_string(),
            color: tier.color_token().to_string(),
        }
    }
}

/// Matrix row order: most severe impact first.
pub const IMPACT_AXIS: [RiskImpact; 4] = [
    RiskImpact::Critical,
    RiskImpact::High,
    RiskImpact::Medium,
    RiskImpact::Low,
];

/// Matrix column order: least likely first.
pub const LIKELIHOOD_AXIS: [RiskLikelihood; 3] = [
    RiskLikelihood::Low,
    RiskLikelihood::Medium,
    RiskLikelihood::High,
];

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Fixed severity table, one arm per (impact, likelihood) pair.
pub fn tier_for(impact: RiskImpact, likelihood: RiskLikelihood) -> SeverityTier {
    use RiskImpact as I;
    use RiskLikelihood as L;

    match (impact, likelihood) {
        (I::Critical, L::High) | (I::Critical, L::Medium) | (I::High, L::High) => {
            SeverityTier::Severe
        }
        (I::Critical, L::Low) | (I::High, L::Medium) | (I::Medium, L::High) => SeverityTier::High,
        (I::High, L::Low) | (I::Medium, L::Medium) => SeverityTier::Moderate,
        (I::Medium, L::Low) | (I::Low, L::High) | (I::Low, L::Medium) => SeverityTier::Low,
        (I::Low, L::Low) => SeverityTier::Minor,
    }
}

/// Classify an (impact, likelihood) pair into its tier, label and color.
pub fn classify(impact: RiskImpact, likelihood: RiskLikelihood) -> SeverityCellStyle {
    tier_for(impact, likelihood).into()
}

/// All twelve cells in presentation order (impact rows, likelihood columns).
pub fn severity_grid() -> Vec<(RiskImpact, RiskLikelihood, SeverityCellStyle)> {
    IMPACT_AXIS
        .iter()
        .flat_map(|&i| LIKELIHOOD_AXIS.iter().map(move |&l| (i, l, classify(i, l))))
        .collect()
}

/// Input for a single classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyInput {
    pub impact: RiskImpact,
    pub likelihood: RiskLikelihood,
}

/// Classify one pair inside the standard computation envelope.
pub fn classify_pair(input: &ClassifyInput) -> ZisRiskResult<ComputationOutput<SeverityCellStyle>> {
    let start = Instant::now();
    let style = classify(input.impact, input.likelihood);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed 4x3 impact-likelihood severity matrix",
        input,
        Vec::new(),
        elapsed,
        style,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_every_pair_classified() {
        let mut seen = 0;
        for impact in RiskImpact::ALL {
            for likelihood in RiskLikelihood::ALL {
                let style = classify(impact, likelihood);
                assert!(SeverityTier::ALL.contains(&style.tier));
                assert_eq!(style.label, style.tier.label());
                seen += 1;
            }
        }
        assert_eq!(seen, 12);
    }

    #[test]
    fn test_decision_table_rows() {
        use RiskImpact as I;
        use RiskLikelihood as L;
        let expected = [
            (I::Critical, L::High, SeverityTier::Severe),
            (I::Critical, L::Medium, SeverityTier::Severe),
            (I::High, L::High, SeverityTier::Severe),
            (I::Critical, L::Low, SeverityTier::High),
            (I::High, L::Medium, SeverityTier::High),
            (I::Medium, L::High, SeverityTier::High),
            (I::High, L::Low, SeverityTier::Moderate),
            (I::Medium, L::Medium, SeverityTier::Moderate),
            (I::Medium, L::Low, SeverityTier::Low),
            (I::Low, L::High, SeverityTier::Low),
            (I::Low, L::Medium, SeverityTier::Low),
            (I::Low, L::Low, SeverityTier::Minor),
        ];
        for (i, l, tier) in expected {
            assert_eq!(tier_for(i, l), tier, "{i} x {l}");
        }
    }

    #[test]
    fn test_tier_distribution() {
        let mut counts: HashMap<SeverityTier, usize> = HashMap::new();
        for (_, _, style) in severity_grid() {
            *counts.entry(style.tier).or_default() += 1;
        }
        assert_eq!(counts[&SeverityTier::Severe], 3);
        assert_eq!(counts[&SeverityTier::High], 3);
        assert_eq!(counts[&SeverityTier::Moderate], 2);
        assert_eq!(counts[&SeverityTier::Low], 3);
        assert_eq!(counts[&SeverityTier::Minor], 1);
    }

    #[test]
    fn test_grid_presentation_order() {
        let grid = severity_grid();
        assert_eq!(grid.len(), 12);
        assert_eq!((grid[0].0, grid[0].1), (RiskImpact::Critical, RiskLikelihood::Low));
        assert_eq!((grid[2].0, grid[2].1), (RiskImpact::Critical, RiskLikelihood::High));
        assert_eq!((grid[11].0, grid[11].1), (RiskImpact::Low, RiskLikelihood::High));
    }

    #[test]
    fn test_color_tokens_distinct() {
        let mut tokens: Vec<&str> = SeverityTier::ALL.iter().map(|t| t.color_token()).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_classify_pair_envelope() {
        let out = classify_pair(&ClassifyInput {
            impact: RiskImpact::High,
            likelihood: RiskLikelihood::Medium,
        })
        .unwrap();
        assert_eq!(out.result.tier, SeverityTier::High);
        assert_eq!(out.result.color, "orange-600");
        assert!(out.warnings.is_empty());
    }
}
