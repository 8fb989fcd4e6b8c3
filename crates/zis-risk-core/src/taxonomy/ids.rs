use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::record::RiskRecord;
use crate::error::ZisRiskError;
use crate::ZisRiskResult;

/// Which scheme produced an id. Several schemes share one id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdScheme {
    /// Logged by hand (`MN-006`).
    Manual,
    /// Inserted from an assistant suggestion batch (`AI-007`).
    Assistant,
    /// Seed data, operational domain (`OP-001`).
    SeedOperational,
    /// Seed data, reputation domain (`RP-001`).
    SeedReputation,
    /// Seed data, Sharia domain (`SH-001`).
    SeedSharia,
    Other,
}

impl IdScheme {
    pub fn of(id: &str) -> IdScheme {
        match id.split_once('-').map(|(prefix, _)| prefix) {
            Some("MN") => IdScheme::Manual,
            Some("AI") => IdScheme::Assistant,
            Some("OP") => IdScheme::SeedOperational,
            Some("RP") => IdScheme::SeedReputation,
            Some("SH") => IdScheme::SeedSharia,
            _ => IdScheme::Other,
        }
    }
}

fn padded(prefix: &str, seq: usize) -> String {
    format!("{}-{:03}", prefix, seq)
}

/// Id for a manually logged risk given the current collection size.
pub fn manual_risk_id(current_count: usize) -> String {
    padded("MN", current_count + 1)
}

/// Id for the `seq`-th assistant-suggested risk.
pub fn ai_risk_id(seq: usize) -> String {
    padded("AI", seq)
}

/// First `{prefix}-{seq:03}` at or after `start_seq` not already used by
/// `existing`. Count-derived ids collide after deletions; this keeps the
/// collection-wide uniqueness invariant.
pub fn next_available_id(prefix: &str, start_seq: usize, existing: &[RiskRecord]) -> String {
    let taken: HashSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
    let mut seq = start_seq;
    loop {
        let candidate = padded(prefix, seq);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        seq += 1;
    }
}

/// Fail on the first id that appears twice.
pub fn ensure_unique_ids(records: &[RiskRecord]) -> ZisRiskResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.id.as_str()) {
            return Err(ZisRiskError::DuplicateId(r.id.clone()));
        }
    }
    Ok(())
}
