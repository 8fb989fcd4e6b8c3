use serde::{Deserialize, Serialize};

use crate::taxonomy::{RiskCategory, RiskRecord, RiskStatus};

/// Per-category status counts for the category distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStatusCounts {
    pub category: RiskCategory,
    /// Display name used as the chart axis label.
    pub name: String,
    pub open: usize,
    pub mitigated: usize,
    pub monitoring: usize,
    pub closed: usize,
}

impl CategoryStatusCounts {
    fn empty(category: RiskCategory) -> Self {
        CategoryStatusCounts {
            category,
            name: category.display_name().to_string(),
            open: 0,
            mitigated: 0,
            monitoring: 0,
            closed: 0,
        }
    }

    fn slot(&mut self, status: RiskStatus) -> &mut usize {
        match status {
            RiskStatus::Open => &mut self.open,
            RiskStatus::Mitigated => &mut self.mitigated,
            RiskStatus::Monitoring => &mut self.monitoring,
            RiskStatus::Closed => &mut self.closed,
        }
    }

    pub fn count(&self, status: RiskStatus) -> usize {
        match status {
            RiskStatus::Open => self.open,
            RiskStatus::Mitigated => self.mitigated,
            RiskStatus::Monitoring => self.monitoring,
            RiskStatus::Closed => self.closed,
        }
    }

    pub fn total(&self) -> usize {
        self.open + self.mitigated + self.monitoring + self.closed
    }
}

/// Open risks with Critical or High impact, in input order.
pub fn high_priority(risks: &[RiskRecord]) -> Vec<&RiskRecord> {
    risks.iter().filter(|r| r.is_high_priority()).collect()
}

/// One entry per category (in enum order, zero-filled) with a count for each
/// status. Categories never drop out, so chart axes stay stable on empty input.
pub fn count_by_category_and_status(risks: &[RiskRecord]) -> Vec<CategoryStatusCounts> {
    let mut counts: Vec<CategoryStatusCounts> = RiskCategory::ALL
        .iter()
        .map(|&c| CategoryStatusCounts::empty(c))
        .collect();

    for risk in risks {
        let row = category_index(risk.category);
        *counts[row].slot(risk.status) += 1;
    }
    counts
}

fn category_index(category: RiskCategory) -> usize {
    match category {
        RiskCategory::Operational => 0,
        RiskCategory::Reputation => 1,
        RiskCategory::ShariaCompliance => 2,
    }
}

/// Open risks with Critical impact.
pub fn count_open_critical(risks: &[RiskRecord]) -> usize {
    risks.iter().filter(|r| r.is_open_critical()).count()
}

/// Open risks in `category`. With `ShariaCompliance` this is the compliance-issue KPI.
pub fn count_open_by_category(category: RiskCategory, risks: &[RiskRecord]) -> usize {
    risks
        .iter()
        .filter(|r| r.category == category && r.is_open())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{RiskImpact, RiskLikelihood};
    use pretty_assertions::assert_eq;

    fn risk(
        id: &str,
        category: RiskCategory,
        impact: RiskImpact,
        status: RiskStatus,
    ) -> RiskRecord {
        RiskRecord {
            id: id.to_string(),
            description: format!("risk {id}"),
            category,
            impact,
            likelihood: RiskLikelihood::Medium,
            status,
        }
    }

    fn seed() -> Vec<RiskRecord> {
        vec![
            risk("OP-001", RiskCategory::Operational, RiskImpact::High, RiskStatus::Open),
            risk("OP-002", RiskCategory::Operational, RiskImpact::Medium, RiskStatus::Mitigated),
            risk("RP-001", RiskCategory::Reputation, RiskImpact::Critical, RiskStatus::Monitoring),
            risk("SH-001", RiskCategory::ShariaCompliance, RiskImpact::Critical, RiskStatus::Open),
            risk("OP-003", RiskCategory::Operational, RiskImpact::High, RiskStatus::Mitigated),
        ]
    }

    #[test]
    fn test_high_priority_filter() {
        let risks = vec![
            risk("A", RiskCategory::Operational, RiskImpact::Critical, RiskStatus::Open),
            risk("B", RiskCategory::Operational, RiskImpact::Low, RiskStatus::Open),
            risk("C", RiskCategory::Operational, RiskImpact::High, RiskStatus::Mitigated),
        ];
        let hp = high_priority(&risks);
        assert_eq!(hp.len(), 1);
        assert_eq!(hp[0].id, "A");
    }

    #[test]
    fn test_high_priority_preserves_order() {
        let risks = seed();
        let ids: Vec<&str> = high_priority(&risks).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["OP-001", "SH-001"]);
    }

    #[test]
    fn test_counts_cover_every_combination_on_empty_input() {
        let counts = count_by_category_and_status(&[]);
        assert_eq!(counts.len(), 3);
        let names: Vec<&str> = counts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Operational", "Reputation", "Sharia Compliance"]);
        for row in &counts {
            for status in RiskStatus::ALL {
                assert_eq!(row.count(status), 0);
            }
        }
    }

    #[test]
    fn test_counts_sum_to_collection_size() {
        let risks = seed();
        let counts = count_by_category_and_status(&risks);
        let total: usize = counts.iter().map(|c| c.total()).sum();
        assert_eq!(total, risks.len());

        let op = &counts[0];
        assert_eq!(op.open, 1);
        assert_eq!(op.mitigated, 2);
        assert_eq!(counts[1].monitoring, 1);
        assert_eq!(counts[2].open, 1);
    }

    #[test]
    fn test_predicate_counts() {
        let risks = seed();
        assert_eq!(count_open_critical(&risks), 1);
        assert_eq!(count_open_by_category(RiskCategory::ShariaCompliance, &risks), 1);
        assert_eq!(count_open_by_category(RiskCategory::Reputation, &risks), 0);
        assert_eq!(count_open_critical(&[]), 0);
    }
}
