use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ZisRiskError;
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::ZisRiskResult;

/// One Sharia compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// The checklist reviewed with the Sharia Supervisory Board (DPS). Items are
/// added and toggled; there is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplianceChecklist {
    items: Vec<ComplianceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_pct: Percent,
    pub pending_items: Vec<String>,
}

const SHARIA_DEFAULTS: [(&str, bool); 13] = [
    ("Struktur akad pengumpulan dana (ZIS) telah disetujui DPS.", true),
    ("Proses penyaluran dana sesuai dengan 8 golongan (ashnaf).", true),
    ("Investasi dana ZIS ditempatkan pada instrumen syariah yang bebas riba.", false),
    ("Laporan keuangan tahunan telah diaudit oleh auditor syariah.", true),
    ("Rasio Hak Amil (RHA) tidak melebihi batas yang ditetapkan syariat.", true),
    ("Tidak ada saldo kas mengendap yang berlebihan (di luar batas ideal ACR).", true),
    ("Seluruh kampanye dan materi promosi telah ditinjau oleh DPS.", false),
    ("Mekanisme penanganan keluhan dan sengketa sesuai prinsip syariah.", true),
    ("SOP (Standar Operasional Prosedur) internal telah divalidasi oleh DPS.", false),
    ("Pelatihan reguler mengenai prinsip muamalah diberikan kepada amil.", true),
    ("Mekanisme pemisahan dan penyaluran dana non-halal yang tidak sengaja diterima.", false),
    ("Kerahasiaan dan keamanan data muzakki dan mustahik terjamin.", true),
    ("Laporan kepatuhan syariah disampaikan secara berkala kepada DPS.", false),
];

impl ComplianceChecklist {
    pub fn new(items: Vec<ComplianceItem>) -> Self {
        ComplianceChecklist { items }
    }

    /// The standard thirteen-item checklist, ids `sc-1`..`sc-13`.
    pub fn sharia_default() -> Self {
        let items = SHARIA_DEFAULTS
            .iter()
            .enumerate()
            .map(|(i, (text, completed))| ComplianceItem {
                id: format!("sc-{}", i + 1),
                text: text.to_string(),
                completed: *completed,
            })
            .collect();
        ComplianceChecklist { items }
    }

    pub fn items(&self) -> &[ComplianceItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ComplianceItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Append an unchecked item stamped with the current time.
    pub fn add_item(&mut self, text: &str) -> ZisRiskResult<&ComplianceItem> {
        self.add_item_at(text, Utc::now())
    }

    /// Append an unchecked item with id `sc-<unix millis>` from `at`.
    ///
    /// Two items created in the same millisecond share an id.
    pub fn add_item_at(&mut self, text: &str, at: DateTime<Utc>) -> ZisRiskResult<&ComplianceItem> {
        if text.trim().is_empty() {
            return Err(ZisRiskError::InvalidInput {
                field: "text".to_string(),
                reason: "Checklist item description cannot be empty.".to_string(),
            });
        }
        self.items.push(ComplianceItem {
            id: format!("sc-{}", at.timestamp_millis()),
            text: text.to_string(),
            completed: false,
        });
        let idx = self.items.len() - 1;
        Ok(&self.items[idx])
    }

    /// Flip `completed` on every item with this id; returns the new state.
    pub fn toggle(&mut self, id: &str) -> ZisRiskResult<bool> {
        let mut new_state = None;
        for item in self.items.iter_mut().filter(|i| i.id == id) {
            item.completed = !item.completed;
            new_state.get_or_insert(item.completed);
        }
        new_state.ok_or_else(|| ZisRiskError::NotFound(format!("checklist item '{}'", id)))
    }

    pub fn summary(&self) -> ChecklistSummary {
        let total = self.items.len();
        let completed = self.items.iter().filter(|i| i.completed).count();
        let completion_pct = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(completed as u64) / Decimal::from(total as u64) * dec!(100)).round_dp(1)
        };
        ChecklistSummary {
            total,
            completed,
            pending: total - completed,
            completion_pct,
            pending_items: self
                .items
                .iter()
                .filter(|i| !i.completed)
                .map(|i| i.text.clone())
                .collect(),
        }
    }
}

/// Checklist plus toggles/additions to apply before summarising.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistInput {
    /// Defaults to the standard Sharia checklist when omitted.
    #[serde(default)]
    pub items: Option<Vec<ComplianceItem>>,
    #[serde(default)]
    pub toggle: Vec<String>,
    #[serde(default)]
    pub add: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistOutput {
    pub items: Vec<ComplianceItem>,
    pub summary: ChecklistSummary,
}

pub fn summarize_checklist(input: &ChecklistInput) -> ZisRiskResult<ComputationOutput<ChecklistOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let mut checklist = match input.items {
        Some(ref items) => ComplianceChecklist::new(items.clone()),
        None => ComplianceChecklist::sharia_default(),
    };
    for text in &input.add {
        checklist.add_item(text)?;
    }
    for id in &input.toggle {
        checklist.toggle(id)?;
    }

    let summary = checklist.summary();
    if summary.pending > 0 {
        warnings.push(format!(
            "{} of {} compliance checks still pending DPS sign-off",
            summary.pending, summary.total
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sharia compliance checklist completion",
        &serde_json::json!({ "toggled": input.toggle, "added": input.add.len() }),
        warnings,
        elapsed,
        ChecklistOutput {
            items: checklist.items,
            summary,
        },
    ))
}
