//! AI-assisted risk identification.
//!
//! A [`RiskSuggester`] turns a free-text scenario into candidate risks. The
//! candidates only become records through [`materialize_suggestions`], which
//! assigns `AI-` ids and the Open status.

#[cfg(feature = "simulation")]
pub mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ZisRiskError;
use crate::taxonomy::{
    ai_risk_id, RiskCategory, RiskImpact, RiskLikelihood, RiskRecord, RiskStatus,
};
use crate::ZisRiskResult;

#[cfg(feature = "simulation")]
pub use scripted::ScriptedSuggester;

/// A risk proposed by the assistant, before it has an id or status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedRisk {
    pub description: String,
    pub category: RiskCategory,
    pub impact: RiskImpact,
    pub likelihood: RiskLikelihood,
}

#[async_trait]
pub trait RiskSuggester: Send + Sync {
    /// Propose risks for `scenario`. Failures are reported as
    /// [`ZisRiskError::Suggestion`] and never touch the risk collection.
    async fn identify_risks(&self, scenario: &str) -> ZisRiskResult<Vec<SuggestedRisk>>;
}

/// Reject a blank scenario before the assistant is called.
pub fn validate_scenario(scenario: &str) -> ZisRiskResult<()> {
    if scenario.trim().is_empty() {
        return Err(ZisRiskError::Suggestion(
            "Please describe a scenario.".to_string(),
        ));
    }
    Ok(())
}

/// Records for a suggestion batch, numbered `AI-{start_seq}` upward in
/// suggestion order, all Open.
pub fn materialize_suggestions(
    suggestions: Vec<SuggestedRisk>,
    start_seq: usize,
) -> Vec<RiskRecord> {
    suggestions
        .into_iter()
        .enumerate()
        .map(|(i, s)| RiskRecord {
            id: ai_risk_id(start_seq + i),
            description: s.description,
            category: s.category,
            impact: s.impact,
            likelihood: s.likelihood,
            status: RiskStatus::Open,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(text: &str) -> SuggestedRisk {
        SuggestedRisk {
            description: text.to_string(),
            category: RiskCategory::Reputation,
            impact: RiskImpact::Critical,
            likelihood: RiskLikelihood::Medium,
        }
    }

    #[test]
    fn test_materialize_numbers_from_start() {
        let records = materialize_suggestions(vec![suggestion("a"), suggestion("b")], 6);
        assert_eq!(records[0].id, "AI-006");
        assert_eq!(records[1].id, "AI-007");
        assert!(records.iter().all(|r| r.status == RiskStatus::Open));
    }

    #[test]
    fn test_blank_scenario_rejected() {
        let err = validate_scenario("   \n").unwrap_err();
        assert_eq!(err.to_string(), "Please describe a scenario.");
        assert!(validate_scenario("Kampanye donasi online baru").is_ok());
    }

    #[test]
    fn test_suggestion_wire_format() {
        let s: SuggestedRisk = serde_json::from_str(
            r#"{"description":"x","category":"ShariaCompliance","impact":"High","likelihood":"Low"}"#,
        )
        .unwrap();
        assert_eq!(s.category, RiskCategory::ShariaCompliance);
    }
}
