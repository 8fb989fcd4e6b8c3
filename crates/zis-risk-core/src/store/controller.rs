//! Single owner of the dashboard's mutable state.
//!
//! The store holds the risk collection, the latest ratio readings, the
//! compliance checklist and the configuration. Every derived view is computed
//! on demand by the pure functions in `dashboard`. Writes go through the
//! repository first; local state changes only after the repository confirms.

use tracing::{info, warn};

use crate::compliance::{ComplianceChecklist, ComplianceItem};
use crate::dashboard::{build_snapshot, DashboardConfig, DashboardSnapshot};
use crate::early_warning::{evaluate_warnings, RatioFeed, RatioReadings};
use crate::error::ZisRiskError;
use crate::repository::RiskRepository;
use crate::suggestion::{materialize_suggestions, RiskSuggester, SuggestedRisk};
use crate::taxonomy::{
    ensure_unique_ids, next_available_id, validate_description, RiskForm, RiskRecord,
};
use crate::ZisRiskResult;

pub struct RiskStore<R: RiskRepository> {
    repository: R,
    risks: Vec<RiskRecord>,
    readings: RatioReadings,
    checklist: ComplianceChecklist,
    config: DashboardConfig,
}

impl<R: RiskRepository> RiskStore<R> {
    /// Empty collection, initial readings and the default Sharia checklist.
    pub fn new(repository: R, config: DashboardConfig) -> Self {
        RiskStore {
            repository,
            risks: Vec::new(),
            readings: RatioReadings::default(),
            checklist: ComplianceChecklist::sharia_default(),
            config,
        }
    }

    pub fn risks(&self) -> &[RiskRecord] {
        &self.risks
    }

    pub fn readings(&self) -> RatioReadings {
        self.readings
    }

    pub fn checklist(&self) -> &ComplianceChecklist {
        &self.checklist
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // -----------------------------------------------------------------------
    // Risk collection
    // -----------------------------------------------------------------------

    /// Replace the local collection with the repository's.
    pub async fn load(&mut self) -> ZisRiskResult<usize> {
        let risks = self.repository.list().await?;
        ensure_unique_ids(&risks)?;
        self.risks = risks;
        info!(count = self.risks.len(), "risk collection loaded");
        Ok(self.risks.len())
    }

    /// Log a new risk (form without id) or edit an existing one in place.
    pub async fn save_risk(&mut self, form: &RiskForm) -> ZisRiskResult<RiskRecord> {
        if let Err(e) = validate_description(&form.description) {
            warn!("rejected risk form: {}", e);
            return Err(e);
        }

        match &form.id {
            Some(id) => {
                let pos = self
                    .position(id)
                    .ok_or_else(|| ZisRiskError::NotFound(format!("risk {}", id)))?;
                let mut updated = self.repository.update(id, form.to_patch()).await?;
                if updated.id != *id {
                    warn!(requested = %id, returned = %updated.id, "repository changed risk id on edit");
                    updated.id = id.clone();
                }
                self.risks[pos] = updated.clone();
                Ok(updated)
            }
            None => {
                let proposed = next_available_id("MN", self.risks.len() + 1, &self.risks);
                let created = self.repository.create(form.to_draft(Some(proposed))).await?;
                self.insert_confirmed(created.clone())?;
                Ok(created)
            }
        }
    }

    /// Remove a risk. Confirmation is the caller's concern.
    pub async fn delete_risk(&mut self, id: &str) -> ZisRiskResult<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| ZisRiskError::NotFound(format!("risk {}", id)))?;
        self.repository.delete(id).await?;
        self.risks.remove(pos);
        Ok(())
    }

    /// Persist an assistant batch as `AI-` records, one at a time. Stops at
    /// the first failure; records confirmed before it stay in the collection.
    pub async fn add_suggestions(
        &mut self,
        suggestions: Vec<SuggestedRisk>,
    ) -> ZisRiskResult<Vec<RiskRecord>> {
        let start_seq = self.risks.len() + 1;
        let mut added = Vec::new();
        for (i, mut record) in materialize_suggestions(suggestions, start_seq)
            .into_iter()
            .enumerate()
        {
            if self.position(&record.id).is_some() {
                record.id = next_available_id("AI", start_seq + i, &self.risks);
            }
            let created = self.repository.create((&record).into()).await?;
            self.insert_confirmed(created.clone())?;
            added.push(created);
        }
        info!(count = added.len(), "assistant risks added");
        Ok(added)
    }

    /// Ask the assistant about `scenario` and add what it proposes. A failed
    /// suggestion leaves the collection untouched.
    pub async fn suggest(
        &mut self,
        suggester: &dyn RiskSuggester,
        scenario: &str,
    ) -> ZisRiskResult<Vec<RiskRecord>> {
        let suggestions = suggester.identify_risks(scenario).await?;
        self.add_suggestions(suggestions).await
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.risks.iter().position(|r| r.id == id)
    }

    fn insert_confirmed(&mut self, record: RiskRecord) -> ZisRiskResult<()> {
        if self.position(&record.id).is_some() {
            return Err(ZisRiskError::DuplicateId(record.id));
        }
        self.risks.push(record);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Ratio readings
    // -----------------------------------------------------------------------

    pub fn set_readings(&mut self, readings: RatioReadings) {
        self.readings = readings;
    }

    /// Pull the next reading from `feed` and make it current.
    pub fn poll_feed(&mut self, feed: &mut dyn RatioFeed) -> RatioReadings {
        self.readings = feed.next_reading();
        self.readings
    }

    // -----------------------------------------------------------------------
    // Compliance checklist
    // -----------------------------------------------------------------------

    pub fn add_checklist_item(&mut self, text: &str) -> ZisRiskResult<ComplianceItem> {
        self.checklist.add_item(text).cloned()
    }

    pub fn toggle_checklist_item(&mut self, id: &str) -> ZisRiskResult<bool> {
        self.checklist.toggle(id)
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    pub fn warnings(&self) -> Vec<String> {
        evaluate_warnings(&self.risks, &self.readings, &self.config.early_warning)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        build_snapshot(&self.risks, &self.readings, &self.config)
    }
}
