pub mod categories;
pub mod ids;
pub mod record;

pub use categories::{display_name, RiskCategory, RiskImpact, RiskLikelihood, RiskStatus};
pub use ids::{ai_risk_id, ensure_unique_ids, manual_risk_id, next_available_id, IdScheme};
pub use record::{validate_description, RiskDraft, RiskForm, RiskPatch, RiskRecord};
