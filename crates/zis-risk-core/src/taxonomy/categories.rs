use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ZisRiskError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    Operational,
    Reputation,
    ShariaCompliance,
}

/// Ordered by severity, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskImpact {
    Low,
    Medium,
    High,
    Critical,
}

/// Ordered by probability, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLikelihood {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskStatus {
    Open,
    Mitigated,
    Monitoring,
    Closed,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Operational,
        RiskCategory::Reputation,
        RiskCategory::ShariaCompliance,
    ];

    /// Enum key as stored by the backend.
    pub fn key(&self) -> &'static str {
        match self {
            RiskCategory::Operational => "Operational",
            RiskCategory::Reputation => "Reputation",
            RiskCategory::ShariaCompliance => "ShariaCompliance",
        }
    }

    /// Human-readable label. Only `ShariaCompliance` differs from its key.
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskCategory::Operational => "Operational",
            RiskCategory::Reputation => "Reputation",
            RiskCategory::ShariaCompliance => "Sharia Compliance",
        }
    }
}

/// Free-function form of [`RiskCategory::display_name`].
pub fn display_name(category: RiskCategory) -> &'static str {
    category.display_name()
}

impl RiskImpact {
    pub const ALL: [RiskImpact; 4] = [
        RiskImpact::Low,
        RiskImpact::Medium,
        RiskImpact::High,
        RiskImpact::Critical,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskImpact::Low => "Low",
            RiskImpact::Medium => "Medium",
            RiskImpact::High => "High",
            RiskImpact::Critical => "Critical",
        }
    }

    /// Critical and High impacts feed the high-priority list.
    pub fn is_high_priority(&self) -> bool {
        matches!(self, RiskImpact::Critical | RiskImpact::High)
    }
}

impl RiskLikelihood {
    pub const ALL: [RiskLikelihood; 3] = [
        RiskLikelihood::Low,
        RiskLikelihood::Medium,
        RiskLikelihood::High,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskLikelihood::Low => "Low",
            RiskLikelihood::Medium => "Medium",
            RiskLikelihood::High => "High",
        }
    }
}

impl RiskStatus {
    pub const ALL: [RiskStatus; 4] = [
        RiskStatus::Open,
        RiskStatus::Mitigated,
        RiskStatus::Monitoring,
        RiskStatus::Closed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskStatus::Open => "Open",
            RiskStatus::Mitigated => "Mitigated",
            RiskStatus::Monitoring => "Monitoring",
            RiskStatus::Closed => "Closed",
        }
    }
}

// ---------------------------------------------------------------------------
// Display / FromStr
// ---------------------------------------------------------------------------

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Display for RiskImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for RiskLikelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Case-insensitive match ignoring spaces, so "Sharia Compliance",
/// "sharia_compliance" and "ShariaCompliance" all resolve to the same key.
fn normalise(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_closed<T: Copy>(
    field: &str,
    raw: &str,
    variants: &[T],
    key: impl Fn(&T) -> &'static str,
) -> Result<T, ZisRiskError> {
    let wanted = normalise(raw);
    variants
        .iter()
        .find(|v| normalise(key(*v)) == wanted)
        .copied()
        .ok_or_else(|| ZisRiskError::InvalidInput {
            field: field.to_string(),
            reason: format!(
                "'{}' is not one of: {}",
                raw,
                variants.iter().map(|v| key(v)).collect::<Vec<_>>().join(", ")
            ),
        })
}

impl FromStr for RiskCategory {
    type Err = ZisRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed("category", s, &RiskCategory::ALL, |c| c.key())
    }
}

impl FromStr for RiskImpact {
    type Err = ZisRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed("impact", s, &RiskImpact::ALL, |i| i.key())
    }
}

impl FromStr for RiskLikelihood {
    type Err = ZisRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed("likelihood", s, &RiskLikelihood::ALL, |l| l.key())
    }
}

impl FromStr for RiskStatus {
    type Err = ZisRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed("status", s, &RiskStatus::ALL, |s| s.key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
