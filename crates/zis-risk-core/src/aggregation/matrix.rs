use serde::{Deserialize, Serialize};

use crate::severity::{classify, SeverityTier, IMPACT_AXIS, LIKELIHOOD_AXIS};
use crate::taxonomy::{RiskImpact, RiskLikelihood, RiskRecord};

/// One (impact, likelihood) cell of the risk matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCell {
    pub impact: RiskImpact,
    pub likelihood: RiskLikelihood,
    pub tier: SeverityTier,
    pub label: String,
    pub color: String,
    pub risks: Vec<RiskRecord>,
}

impl SeverityCell {
    pub fn count(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }
}

/// The 4x3 matrix, cells stored row-major in axis order
/// (Critical..Low rows, Low..High columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMatrix {
    pub cells: Vec<SeverityCell>,
}

fn row(impact: RiskImpact) -> usize {
    match impact {
        RiskImpact::Critical => 0,
        RiskImpact::High => 1,
        RiskImpact::Medium => 2,
        RiskImpact::Low => 3,
    }
}

fn column(likelihood: RiskLikelihood) -> usize {
    match likelihood {
        RiskLikelihood::Low => 0,
        RiskLikelihood::Medium => 1,
        RiskLikelihood::High => 2,
    }
}

fn position(impact: RiskImpact, likelihood: RiskLikelihood) -> usize {
    row(impact) * LIKELIHOOD_AXIS.len() + column(likelihood)
}

impl RiskMatrix {
    fn empty() -> Self {
        let cells = IMPACT_AXIS
            .iter()
            .flat_map(|&impact| {
                LIKELIHOOD_AXIS.iter().map(move |&likelihood| {
                    let style = classify(impact, likelihood);
                    SeverityCell {
                        impact,
                        likelihood,
                        tier: style.tier,
                        label: style.label,
                        color: style.color,
                        risks: Vec::new(),
                    }
                })
            })
            .collect();
        RiskMatrix { cells }
    }

    pub fn cell(&self, impact: RiskImpact, likelihood: RiskLikelihood) -> &SeverityCell {
        &self.cells[position(impact, likelihood)]
    }

    /// Number of risks placed in the matrix.
    pub fn total(&self) -> usize {
        self.cells.iter().map(SeverityCell::count).sum()
    }

    /// Risk count per tier, most severe first.
    pub fn tier_counts(&self) -> Vec<(SeverityTier, usize)> {
        SeverityTier::ALL
            .iter()
            .map(|&tier| {
                let n: usize = self
                    .cells
                    .iter()
                    .filter(|c| c.tier == tier)
                    .map(SeverityCell::count)
                    .sum();
                (tier, n)
            })
            .collect()
    }
}

/// Place every risk in the cell of its (impact, likelihood) pair. Typed input
/// always lands in exactly one cell, so nothing is dropped.
pub fn bucket_by_matrix_cell(risks: &[RiskRecord]) -> RiskMatrix {
    let mut matrix = RiskMatrix::empty();
    for risk in risks {
        matrix.cells[position(risk.impact, risk.likelihood)]
            .risks
            .push(risk.clone());
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{RiskCategory, RiskStatus};

    fn risk(id: &str, impact: RiskImpact, likelihood: RiskLikelihood) -> RiskRecord {
        RiskRecord {
            id: id.to_string(),
            description: format!("risk {id}"),
            category: RiskCategory::Operational,
            impact,
            likelihood,
            status: RiskStatus::Open,
        }
    }

    #[test]
    fn test_empty_matrix_has_twelve_cells() {
        let m = bucket_by_matrix_cell(&[]);
        assert_eq!(m.cells.len(), 12);
        assert_eq!(m.total(), 0);
        assert!(m.cells.iter().all(SeverityCell::is_empty));
    }

    #[test]
    fn test_cells_follow_axis_order() {
        let m = bucket_by_matrix_cell(&[]);
        for (i, impact) in IMPACT_AXIS.iter().enumerate() {
            for (j, likelihood) in LIKELIHOOD_AXIS.iter().enumerate() {
                let c = &m.cells[i * 3 + j];
                assert_eq!((c.impact, c.likelihood), (*impact, *likelihood));
            }
        }
    }

    #[test]
    fn test_bucketing_places_each_risk_once() {
        let risks = vec![
            risk("OP-001", RiskImpact::High, RiskLikelihood::Medium),
            risk("RP-001", RiskImpact::Critical, RiskLikelihood::Medium),
            risk("SH-001", RiskImpact::Critical, RiskLikelihood::Low),
            risk("OP-003", RiskImpact::High, RiskLikelihood::Low),
            risk("OP-004", RiskImpact::High, RiskLikelihood::Medium),
        ];
        let m = bucket_by_matrix_cell(&risks);
        assert_eq!(m.total(), risks.len());

        let hm = m.cell(RiskImpact::High, RiskLikelihood::Medium);
        assert_eq!(hm.count(), 2);
        assert_eq!(hm.tier, SeverityTier::High);
        assert_eq!(hm.risks[0].id, "OP-001");
        assert_eq!(hm.risks[1].id, "OP-004");

        let cm = m.cell(RiskImpact::Critical, RiskLikelihood::Medium);
        assert_eq!(cm.tier, SeverityTier::Severe);
        assert_eq!(cm.count(), 1);
    }

    #[test]
    fn test_tier_counts() {
        let risks = vec![
            risk("A", RiskImpact::Critical, RiskLikelihood::High),
            risk("B", RiskImpact::Low, RiskLikelihood::Low),
            risk("C", RiskImpact::Low, RiskLikelihood::Low),
        ];
        let counts = bucket_by_matrix_cell(&risks).tier_counts();
        assert_eq!(counts[0], (SeverityTier::Severe, 1));
        assert_eq!(counts[4], (SeverityTier::Minor, 2));
        assert_eq!(counts[2], (SeverityTier::Moderate, 0));
    }
}
