use serde::{Deserialize, Serialize};

use super::categories::{RiskCategory, RiskImpact, RiskLikelihood, RiskStatus};
use crate::error::ZisRiskError;
use crate::ZisRiskResult;

/// One tracked risk. `id` is unique across the whole collection and never
/// changes across edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub id: String,
    pub description: String,
    pub category: RiskCategory,
    pub impact: RiskImpact,
    pub likelihood: RiskLikelihood,
    pub status: RiskStatus,
}

/// Body of a create request: a record without a server-confirmed id.
///
/// The client may propose an id (the `MN-`/`AI-` schemes); the id on the
/// record returned by the repository is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    pub category: RiskCategory,
    pub impact: RiskImpact,
    pub likelihood: RiskLikelihood,
    pub status: RiskStatus,
}

/// Partial update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<RiskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<RiskImpact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<RiskLikelihood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RiskStatus>,
}

/// What a staff member submits from the log/edit form. `id` is `None` when
/// logging a new risk and set when editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: RiskCategory,
    #[serde(default = "default_impact")]
    pub impact: RiskImpact,
    #[serde(default = "default_likelihood")]
    pub likelihood: RiskLikelihood,
    #[serde(default = "default_status")]
    pub status: RiskStatus,
}

fn default_category() -> RiskCategory {
    RiskCategory::Operational
}

fn default_impact() -> RiskImpact {
    RiskImpact::Low
}

fn default_likelihood() -> RiskLikelihood {
    RiskLikelihood::Low
}

fn default_status() -> RiskStatus {
    RiskStatus::Open
}

/// Reject blank descriptions before any write is attempted.
pub fn validate_description(description: &str) -> ZisRiskResult<()> {
    if description.trim().is_empty() {
        return Err(ZisRiskError::invalid(
            "description",
            "Description cannot be empty.",
        ));
    }
    Ok(())
}

impl RiskRecord {
    pub fn is_open(&self) -> bool {
        self.status == RiskStatus::Open
    }

    /// Open and of Critical or High impact.
    pub fn is_high_priority(&self) -> bool {
        self.impact.is_high_priority() && self.is_open()
    }

    pub fn is_open_critical(&self) -> bool {
        self.impact == RiskImpact::Critical && self.is_open()
    }
}

impl RiskDraft {
    pub fn into_record(self, id: String) -> RiskRecord {
        RiskRecord {
            id,
            description: self.description,
            category: self.category,
            impact: self.impact,
            likelihood: self.likelihood,
            status: self.status,
        }
    }
}

impl From<&RiskRecord> for RiskDraft {
    fn from(record: &RiskRecord) -> Self {
        RiskDraft {
            id: Some(record.id.clone()),
            description: record.description.clone(),
            category: record.category,
            impact: record.impact,
            likelihood: record.likelihood,
            status: record.status,
        }
    }
}

impl RiskPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.impact.is_none()
            && self.likelihood.is_none()
            && self.status.is_none()
    }

    /// Apply the present fields onto `record`, leaving its id untouched.
    pub fn apply_to(&self, record: &mut RiskRecord) {
        if let Some(ref d) = self.description {
            record.description = d.clone();
        }
        if let Some(c) = self.category {
            record.category = c;
        }
        if let Some(i) = self.impact {
            record.impact = i;
        }
        if let Some(l) = self.likelihood {
            record.likelihood = l;
        }
        if let Some(s) = self.status {
            record.status = s;
        }
    }
}

impl RiskForm {
    pub fn to_draft(&self, proposed_id: Option<String>) -> RiskDraft {
        RiskDraft {
            id: proposed_id,
            description: self.description.clone(),
            category: self.category,
            impact: self.impact,
            likelihood: self.likelihood,
            status: self.status,
        }
    }

    pub fn to_patch(&self) -> RiskPatch {
        RiskPatch {
            description: Some(self.description.clone()),
            category: Some(self.category),
            impact: Some(self.impact),
            likelihood: Some(self.likelihood),
            status: Some(self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RiskRecord {
        RiskRecord {
            id: "OP-001".to_string(),
            description: "Kurang tepat dalam menentukan delapan ashnaf".to_string(),
            category: RiskCategory::Operational,
            impact: RiskImpact::High,
            likelihood: RiskLikelihood::Medium,
            status: RiskStatus::Open,
        }
    }

    #[test]
    fn test_blank_description_rejected() {
        assert!(validate_description("   \n\t").is_err());
        assert!(validate_description("").is_err());
        assert!(validate_description("Kegagalan sistem IT").is_ok());
    }

    #[test]
    fn test_predicates() {
        let mut r = record();
        assert!(r.is_high_priority());
        assert!(!r.is_open_critical());
        r.impact = RiskImpact::Critical;
        assert!(r.is_open_critical());
        r.status = RiskStatus::Monitoring;
        assert!(!r.is_high_priority());
        assert!(!r.is_open_critical());
    }

    #[test]
    fn test_patch_keeps_id() {
        let mut r = record();
        let patch = RiskPatch {
            status: Some(RiskStatus::Mitigated),
            ..Default::default()
        };
        patch.apply_to(&mut r);
        assert_eq!(r.id, "OP-001");
        assert_eq!(r.status, RiskStatus::Mitigated);
        assert_eq!(r.impact, RiskImpact::High);
    }

    #[test]
    fn test_patch_skips_absent_fields_on_wire() {
        let patch = RiskPatch {
            impact: Some(RiskImpact::Critical),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "impact": "Critical" }));
    }

    #[test]
    fn test_draft_without_id_omits_it() {
        let draft = RiskDraft {
            id: None,
            description: "Kampanye negatif di media sosial".into(),
            category: RiskCategory::Reputation,
            impact: RiskImpact::Critical,
            likelihood: RiskLikelihood::Medium,
            status: RiskStatus::Monitoring,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["category"], "Reputation");
    }

    #[test]
    fn test_form_defaults_match_log_dialog() {
        let form: RiskForm =
            serde_json::from_str(r#"{ "description": "Risiko baru" }"#).unwrap();
        assert_eq!(form.category, RiskCategory::Operational);
        assert_eq!(form.impact, RiskImpact::Low);
        assert_eq!(form.likelihood, RiskLikelihood::Low);
        assert_eq!(form.status, RiskStatus::Open);
        assert!(form.id.is_none());
    }
}
