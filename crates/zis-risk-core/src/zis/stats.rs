use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ZisRiskError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::ZisRiskResult;

// ---------------------------------------------------------------------------
// Wire types -- public statistics endpoint
// ---------------------------------------------------------------------------

/// Body of `GET /api/public/zis-stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZisStats {
    pub period: String,
    pub data: ZisStatsData,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZisStatsData {
    #[serde(with = "rust_decimal::serde::float")]
    pub collection_total: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub distribution_total: Money,
    /// Mustahik count.
    pub beneficiaries: u64,
    /// Muzakki count.
    pub donors: u64,
}

// ---------------------------------------------------------------------------
// Fund breakdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundType {
    Zakat,
    InfaqSadaqah,
    Wakaf,
    /// Dana Sosial Keagamaan Lainnya.
    Dskl,
}

/// The eight beneficiary categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ashnaf {
    Fakir,
    Miskin,
    Amil,
    Mualaf,
    Riqab,
    Gharim,
    Fisabilillah,
    IbnuSabil,
}

impl FundType {
    pub fn label(&self) -> &'static str {
        match self {
            FundType::Zakat => "Zakat",
            FundType::InfaqSadaqah => "Infaq/Sadaqah",
            FundType::Wakaf => "Wakaf",
            FundType::Dskl => "DSKL",
        }
    }
}

impl Ashnaf {
    pub fn label(&self) -> &'static str {
        match self {
            Ashnaf::Fakir => "Fakir",
            Ashnaf::Miskin => "Miskin",
            Ashnaf::Amil => "Amil",
            Ashnaf::Mualaf => "Mualaf",
            Ashnaf::Riqab => "Riqab",
            Ashnaf::Gharim => "Gharim",
            Ashnaf::Fisabilillah => "Fisabilillah",
            Ashnaf::IbnuSabil => "Ibnu Sabil",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundCollection {
    pub fund: FundType,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AshnafDistribution {
    pub ashnaf: Ashnaf,
    pub amount: Money,
}

/// Input for the fund-lifecycle summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZisTrackingInput {
    pub stats: ZisStats,
    #[serde(default)]
    pub collections: Vec<FundCollection>,
    #[serde(default)]
    pub distributions: Vec<AshnafDistribution>,
    /// Operating allocation for the amil, used for operational efficiency.
    #[serde(default)]
    pub amil_allocation: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundShare {
    pub name: String,
    pub amount: Money,
    pub share_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZisSummary {
    pub period: String,
    pub status: String,
    pub collection_total: Money,
    pub distribution_total: Money,
    /// Collected but not yet distributed.
    pub managed_funds: Money,
    pub distribution_ratio_pct: Option<Percent>,
    pub average_donation: Option<Money>,
    pub operational_efficiency_pct: Option<Percent>,
    /// RHA implied by the Amil share of distributions, against collections.
    pub implied_rha_pct: Option<Percent>,
    pub beneficiaries: u64,
    pub donors: u64,
    pub collection_shares: Vec<FundShare>,
    pub distribution_by_ashnaf: Vec<FundShare>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `part / whole` as a percentage to 2 dp. `None` when `whole` is zero or the
/// quotient leaves the `Decimal` range.
fn pct(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?
        .checked_mul(dec!(100))
        .map(|p| p.round_dp(2))
}

/// Summary ratio. A zero denominator is reported once by the caller; an
/// out-of-range quotient gets its own warning.
fn ratio(label: &str, part: Decimal, whole: Decimal, warnings: &mut Vec<String>) -> Option<Percent> {
    if whole == Decimal::ZERO {
        return None;
    }
    let value = pct(part, whole);
    if value.is_none() {
        warnings.push(format!(
            "{} is out of range for {} / {}; left undefined",
            label, part, whole
        ));
    }
    value
}

fn checked_total(field: &str, mut amounts: impl Iterator<Item = Money>) -> ZisRiskResult<Money> {
    amounts
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(a))
        .ok_or_else(|| ZisRiskError::InvalidInput {
            field: field.to_string(),
            reason: "Amounts overflow the decimal range".to_string(),
        })
}

fn shares(entries: Vec<(&str, Money)>, total: Money) -> Vec<FundShare> {
    entries
        .into_iter()
        .map(|(name, amount)| FundShare {
            name: name.to_string(),
            amount,
            share_pct: pct(amount, total).unwrap_or(Decimal::ZERO),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Public function: summarize_zis
// ---------------------------------------------------------------------------

/// Collection, management and distribution figures for the ZIS tracking view.
pub fn summarize_zis(input: &ZisTrackingInput) -> ZisRiskResult<ComputationOutput<ZisSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let data = &input.stats.data;

    if data.collection_total < Decimal::ZERO {
        return Err(ZisRiskError::InvalidInput {
            field: "stats.data.collection_total".to_string(),
            reason: "Collection total cannot be negative".to_string(),
        });
    }
    if data.distribution_total < Decimal::ZERO {
        return Err(ZisRiskError::InvalidInput {
            field: "stats.data.distribution_total".to_string(),
            reason: "Distribution total cannot be negative".to_string(),
        });
    }
    for (i, c) in input.collections.iter().enumerate() {
        if c.amount < Decimal::ZERO {
            return Err(ZisRiskError::InvalidInput {
                field: format!("collections[{}].amount", i),
                reason: "Amount cannot be negative".to_string(),
            });
        }
    }
    for (i, d) in input.distributions.iter().enumerate() {
        if d.amount < Decimal::ZERO {
            return Err(ZisRiskError::InvalidInput {
                field: format!("distributions[{}].amount", i),
                reason: "Amount cannot be negative".to_string(),
            });
        }
    }

    let managed_funds = data.collection_total - data.distribution_total;
    if managed_funds < Decimal::ZERO {
        warnings.push("Distributions exceed collections for the period".to_string());
    }
    if data.collection_total == Decimal::ZERO {
        warnings.push("No collections recorded; ratios are undefined".to_string());
    }

    let average_donation = if data.donors == 0 {
        warnings.push("No donors recorded; average donation is undefined".to_string());
        None
    } else {
        data.collection_total
            .checked_div(Decimal::from(data.donors))
            .map(|v| v.round_dp(2))
    };

    let operational_efficiency_pct = input.amil_allocation.and_then(|a| {
        ratio("Operational efficiency", a, data.collection_total, &mut warnings)
    });

    let amil_distributed = checked_total(
        "distributions",
        input
            .distributions
            .iter()
            .filter(|d| d.ashnaf == Ashnaf::Amil)
            .map(|d| d.amount),
    )?;
    let implied_rha_pct = if input.distributions.iter().any(|d| d.ashnaf == Ashnaf::Amil) {
        ratio("Implied RHA", amil_distributed, data.collection_total, &mut warnings)
    } else {
        None
    };
    let distribution_ratio_pct = ratio(
        "Distribution ratio",
        data.distribution_total,
        data.collection_total,
        &mut warnings,
    );

    let collections_total =
        checked_total("collections", input.collections.iter().map(|c| c.amount))?;
    let distributions_total =
        checked_total("distributions", input.distributions.iter().map(|d| d.amount))?;
    if !input.collections.is_empty() && collections_total != data.collection_total {
        warnings.push(format!(
            "Collection breakdown ({}) differs from reported total ({})",
            collections_total, data.collection_total
        ));
    }

    let summary = ZisSummary {
        period: input.stats.period.clone(),
        status: input.stats.status.clone(),
        collection_total: data.collection_total,
        distribution_total: data.distribution_total,
        managed_funds,
        distribution_ratio_pct,
        average_donation,
        operational_efficiency_pct,
        implied_rha_pct,
        beneficiaries: data.beneficiaries,
        donors: data.donors,
        collection_shares: shares(
            input
                .collections
                .iter()
                .map(|c| (c.fund.label(), c.amount))
                .collect(),
            collections_total,
        ),
        distribution_by_ashnaf: shares(
            input
                .distributions
                .iter()
                .map(|d| (d.ashnaf.label(), d.amount))
                .collect(),
            distributions_total,
        ),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ZIS fund lifecycle: collection, management, distribution by ashnaf",
        &serde_json::json!({
            "period": input.stats.period,
            "amil_allocation": input.amil_allocation,
        }),
        warnings,
        elapsed,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> ZisStats {
        ZisStats {
            period: "2024-Current".to_string(),
            data: ZisStatsData {
                collection_total: dec!(925_000_000),
                distribution_total: dec!(710_000_000),
                beneficiaries: 8950,
                donors: 15480,
            },
            status: "Audited".to_string(),
        }
    }

    fn input() -> ZisTrackingInput {
        ZisTrackingInput {
            stats: stats(),
            collections: vec![
                FundCollection { fund: FundType::Zakat, amount: dec!(450_000_000) },
                FundCollection { fund: FundType::InfaqSadaqah, amount: dec!(280_000_000) },
                FundCollection { fund: FundType::Wakaf, amount: dec!(120_000_000) },
                FundCollection { fund: FundType::Dskl, amount: dec!(75_000_000) },
            ],
            distributions: vec![
                AshnafDistribution { ashnaf: Ashnaf::Fakir, amount: dec!(110_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::Miskin, amount: dec!(150_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::Amil, amount: dec!(85_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::Mualaf, amount: dec!(50_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::Riqab, amount: dec!(20_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::Gharim, amount: dec!(70_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::Fisabilillah, amount: dec!(180_000_000) },
                AshnafDistribution { ashnaf: Ashnaf::IbnuSabil, amount: dec!(45_000_000) },
            ],
            amil_allocation: Some(dec!(85_000_000)),
        }
    }

    #[test]
    fn test_public_stats_parse_numeric_json() {
        let raw = r#"{
            "period": "2024-Current",
            "data": {
                "collection_total": 925000000,
                "distribution_total": 710000000.5,
                "beneficiaries": 8950,
                "donors": 15480
            },
            "status": "Audited"
        }"#;
        let s: ZisStats = serde_json::from_str(raw).unwrap();
        assert_eq!(s.data.collection_total, dec!(925000000));
        assert_eq!(s.data.distribution_total, dec!(710000000.5));
        assert_eq!(s.data.donors, 15480);
    }

    #[test]
    fn test_summary_figures() {
        let out = summarize_zis(&input()).unwrap();
        let s = &out.result;
        assert_eq!(s.managed_funds, dec!(215_000_000));
        assert_eq!(s.operational_efficiency_pct, Some(dec!(9.19)));
        assert_eq!(s.implied_rha_pct, Some(dec!(9.19)));
        assert_eq!(s.distribution_ratio_pct, Some(dec!(76.76)));
        assert_eq!(s.average_donation, Some(dec!(59754.52)));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_collection_shares() {
        let out = summarize_zis(&input()).unwrap();
        let shares = &out.result.collection_shares;
        assert_eq!(shares.len(), 4);
        assert_eq!(shares[0].name, "Zakat");
        assert_eq!(shares[0].share_pct, dec!(48.65));
        assert_eq!(out.result.distribution_by_ashnaf[7].name, "Ibnu Sabil");
    }

    #[test]
    fn test_zero_totals_do_not_panic() {
        let mut i = input();
        i.stats.data.collection_total = Decimal::ZERO;
        i.stats.data.distribution_total = Decimal::ZERO;
        i.stats.data.donors = 0;
        i.collections.clear();
        let out = summarize_zis(&i).unwrap();
        assert_eq!(out.result.distribution_ratio_pct, None);
        assert_eq!(out.result.average_donation, None);
        assert_eq!(out.result.operational_efficiency_pct, None);
        assert!(out.warnings.len() >= 2);
    }

    #[test]
    fn test_tiny_collection_total_leaves_ratios_undefined() {
        let mut i = input();
        i.stats.data.collection_total = Decimal::new(1, 21);
        let out = summarize_zis(&i).unwrap();
        assert_eq!(out.result.operational_efficiency_pct, None);
        assert_eq!(out.result.distribution_ratio_pct, None);
        assert_eq!(out.result.implied_rha_pct, None);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("Operational efficiency is out of range")));
    }

    #[test]
    fn test_overflowing_breakdown_rejected() {
        let mut i = input();
        i.collections = vec![
            FundCollection { fund: FundType::Zakat, amount: Decimal::MAX },
            FundCollection { fund: FundType::Wakaf, amount: Decimal::MAX },
        ];
        match summarize_zis(&i) {
            Err(ZisRiskError::InvalidInput { field, .. }) => assert_eq!(field, "collections"),
            other => panic!("expected invalid input, got {:?}", other.map(|o| o.result)),
        }
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut i = input();
        i.stats.data.distribution_total = dec!(-1);
        assert!(summarize_zis(&i).is_err());
    }
}
