use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use super::RiskRepository;
use crate::error::ZisRiskError;
use crate::taxonomy::{ensure_unique_ids, next_available_id, RiskDraft, RiskPatch, RiskRecord};
use crate::ZisRiskResult;

/// Process-local repository. Keeps insertion order; assigns `RK-` ids when a
/// draft proposes none.
#[derive(Debug, Default)]
pub struct InMemoryRiskRepository {
    risks: RwLock<Vec<RiskRecord>>,
}

impl InMemoryRiskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risks(risks: Vec<RiskRecord>) -> ZisRiskResult<Self> {
        ensure_unique_ids(&risks)?;
        Ok(Self {
            risks: RwLock::new(risks),
        })
    }

    pub async fn len(&self) -> usize {
        self.risks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.risks.read().await.is_empty()
    }
}

#[async_trait]
impl RiskRepository for InMemoryRiskRepository {
    async fn list(&self) -> ZisRiskResult<Vec<RiskRecord>> {
        Ok(self.risks.read().await.clone())
    }

    async fn create(&self, draft: RiskDraft) -> ZisRiskResult<RiskRecord> {
        let mut risks = self.risks.write().await;
        let id = match draft.id.clone() {
            Some(id) => {
                if risks.iter().any(|r| r.id == id) {
                    return Err(ZisRiskError::DuplicateId(id));
                }
                id
            }
            None => next_available_id("RK", risks.len() + 1, &risks),
        };
        let record = draft.into_record(id);
        risks.push(record.clone());
        info!(id = %record.id, "stored risk");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: RiskPatch) -> ZisRiskResult<RiskRecord> {
        let mut risks = self.risks.write().await;
        let record = risks
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ZisRiskError::NotFound(format!("risk {}", id)))?;
        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> ZisRiskResult<()> {
        let mut risks = self.risks.write().await;
        let before = risks.len();
        risks.retain(|r| r.id != id);
        if risks.len() == before {
            return Err(ZisRiskError::NotFound(format!("risk {}", id)));
        }
        Ok(())
    }
}
