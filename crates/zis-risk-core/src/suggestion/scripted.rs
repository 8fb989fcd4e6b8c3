use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{validate_scenario, RiskSuggester, SuggestedRisk};
use crate::error::ZisRiskError;
use crate::taxonomy::{RiskCategory, RiskImpact, RiskLikelihood};
use crate::ZisRiskResult;

/// Offline stand-in for the language-model assistant: returns a fixed batch
/// of three risks and fails with a configurable probability.
pub struct ScriptedSuggester {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    response: Vec<SuggestedRisk>,
}

impl ScriptedSuggester {
    pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        ScriptedSuggester {
            rng: Mutex::new(rng),
            failure_rate: Self::DEFAULT_FAILURE_RATE,
            response: canned_response(),
        }
    }

    /// Override the failure probability. Must lie in `[0, 1]`.
    pub fn with_failure_rate(mut self, rate: f64) -> ZisRiskResult<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ZisRiskError::InvalidInput {
                field: "failure_rate".to_string(),
                reason: format!("must be between 0 and 1, got {}", rate),
            });
        }
        self.failure_rate = rate;
        Ok(self)
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

fn canned_response() -> Vec<SuggestedRisk> {
    vec![
        SuggestedRisk {
            description: "Data privasi muzakki (donatur) bocor akibat serangan siber pada platform online.".to_string(),
            category: RiskCategory::Operational,
            impact: RiskImpact::High,
            likelihood: RiskLikelihood::Medium,
        },
        SuggestedRisk {
            description: "Persepsi publik negatif karena kampanye dianggap tidak transparan.".to_string(),
            category: RiskCategory::Reputation,
            impact: RiskImpact::Critical,
            likelihood: RiskLikelihood::Medium,
        },
        SuggestedRisk {
            description: "Metode pembayaran online yang digunakan tidak sepenuhnya patuh syariah.".to_string(),
            category: RiskCategory::ShariaCompliance,
            impact: RiskImpact::High,
            likelihood: RiskLikelihood::Low,
        },
    ]
}

#[async_trait]
impl RiskSuggester for ScriptedSuggester {
    async fn identify_risks(&self, scenario: &str) -> ZisRiskResult<Vec<SuggestedRisk>> {
        validate_scenario(scenario)?;
        debug!(scenario, "identifying risks");

        let failed = self.rng.lock().await.gen_bool(self.failure_rate);
        if failed {
            warn!("scripted suggester failed");
            return Err(ZisRiskError::Suggestion(
                "Simulated API Error: Failed to analyze risks.".to_string(),
            ));
        }
        Ok(self.response.clone())
    }
}
