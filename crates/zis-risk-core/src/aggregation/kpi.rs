use serde::{Deserialize, Serialize};

use super::counts::{count_open_by_category, high_priority};
use crate::taxonomy::{RiskCategory, RiskRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiTrend {
    Up,
    Down,
    Stable,
}

/// A dashboard KPI card. `value` is pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub description: String,
    pub trend: KpiTrend,
}

/// Alerting thresholds for the KPI trend arrows. Fixed configuration, not
/// derived from history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    /// Trend turns `up` when open Critical/High risks exceed this.
    pub high_priority_alert_threshold: usize,
    /// Trend turns `up` when open Sharia-compliance risks exceed this, `down` otherwise.
    pub compliance_alert_threshold: usize,
    /// Reported average days to close a risk.
    pub avg_mitigation_days: u32,
}

impl Default for KpiConfig {
    fn default() -> Self {
        KpiConfig {
            high_priority_alert_threshold: 3,
            compliance_alert_threshold: 1,
            avg_mitigation_days: 12,
        }
    }
}

fn kpi(title: &str, value: String, description: &str, trend: KpiTrend) -> Kpi {
    Kpi {
        title: title.to_string(),
        value,
        description: description.to_string(),
        trend,
    }
}

/// The four headline KPIs, in card order.
pub fn build_kpis(risks: &[RiskRecord], config: &KpiConfig) -> Vec<Kpi> {
    let high_priority_count = high_priority(risks).len();
    let compliance_issues = count_open_by_category(RiskCategory::ShariaCompliance, risks);

    let high_priority_trend = if high_priority_count > config.high_priority_alert_threshold {
        KpiTrend::Up
    } else {
        KpiTrend::Stable
    };
    let compliance_trend = if compliance_issues > config.compliance_alert_threshold {
        KpiTrend::Up
    } else {
        KpiTrend::Down
    };

    vec![
        kpi(
            "Total Risks Logged",
            risks.len().to_string(),
            "All identified risks",
            KpiTrend::Stable,
        ),
        kpi(
            "Open Critical/High Risks",
            high_priority_count.to_string(),
            "Requiring immediate attention",
            high_priority_trend,
        ),
        kpi(
            "Compliance Issues",
            compliance_issues.to_string(),
            "Open Sharia compliance risks",
            compliance_trend,
        ),
        kpi(
            "Avg. Mitigation Time",
            format!("{} days", config.avg_mitigation_days),
            "Time to close open risks",
            KpiTrend::Stable,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{RiskImpact, RiskLikelihood, RiskStatus};

    fn open(id: &str, category: RiskCategory, impact: RiskImpact) -> RiskRecord {
        RiskRecord {
            id: id.to_string(),
            description: "d".to_string(),
            category,
            impact,
            likelihood: RiskLikelihood::Low,
            status: RiskStatus::Open,
        }
    }

    #[test]
    fn test_kpis_on_empty_collection() {
        let kpis = build_kpis(&[], &KpiConfig::default());
        assert_eq!(kpis.len(), 4);
        assert_eq!(kpis[0].value, "0");
        assert_eq!(kpis[1].trend, KpiTrend::Stable);
        assert_eq!(kpis[2].trend, KpiTrend::Down);
        assert_eq!(kpis[3].value, "12 days");
    }

    #[test]
    fn test_high_priority_trend_turns_up_above_three() {
        let mut risks: Vec<RiskRecord> = (0..3)
            .map(|i| open(&format!("OP-{i}"), RiskCategory::Operational, RiskImpact::High))
            .collect();
        let config = KpiConfig::default();
        assert_eq!(build_kpis(&risks, &config)[1].trend, KpiTrend::Stable);

        risks.push(open("OP-9", RiskCategory::Operational, RiskImpact::Critical));
        let kpis = build_kpis(&risks, &config);
        assert_eq!(kpis[1].value, "4");
        assert_eq!(kpis[1].trend, KpiTrend::Up);
    }

    #[test]
    fn test_compliance_trend() {
        let config = KpiConfig::default();
        let one = vec![open("SH-1", RiskCategory::ShariaCompliance, RiskImpact::Low)];
        assert_eq!(build_kpis(&one, &config)[2].trend, KpiTrend::Down);

        let two = vec![
            open("SH-1", RiskCategory::ShariaCompliance, RiskImpact::Low),
            open("SH-2", RiskCategory::ShariaCompliance, RiskImpact::Medium),
        ];
        let kpis = build_kpis(&two, &config);
        assert_eq!(kpis[2].value, "2");
        assert_eq!(kpis[2].trend, KpiTrend::Up);
    }

    #[test]
    fn test_trend_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&KpiTrend::Stable).unwrap(), "\"stable\"");
    }
}
