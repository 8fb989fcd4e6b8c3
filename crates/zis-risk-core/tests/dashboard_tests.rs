use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use zis_risk_core::aggregation::{
    bucket_by_matrix_cell, build_kpis, count_by_category_and_status, high_priority, KpiConfig,
    KpiTrend,
};
use zis_risk_core::dashboard::{build_dashboard, DashboardConfig, DashboardInput};
use zis_risk_core::early_warning::{evaluate_warnings, EarlyWarningConfig, RatioReadings};
use zis_risk_core::severity::{classify, SeverityTier, IMPACT_AXIS, LIKELIHOOD_AXIS};
use zis_risk_core::taxonomy::manual_risk_id;
use zis_risk_core::{RiskCategory, RiskImpact, RiskLikelihood, RiskRecord, RiskStatus};

// ===========================================================================
// Fixtures
// ===========================================================================

fn record(
    id: &str,
    category: RiskCategory,
    impact: RiskImpact,
    likelihood: RiskLikelihood,
    status: RiskStatus,
) -> RiskRecord {
    RiskRecord {
        id: id.to_string(),
        description: format!("Risiko {}", id),
        category,
        impact,
        likelihood,
        status,
    }
}

/// A register resembling a mid-sized institution's seeded data.
fn register() -> Vec<RiskRecord> {
    use RiskCategory::*;
    vec![
        record("OP-001", Operational, RiskImpact::High, RiskLikelihood::Medium, RiskStatus::Open),
        record("OP-002", Operational, RiskImpact::Medium, RiskLikelihood::High, RiskStatus::Mitigated),
        record("OP-003", Operational, RiskImpact::Low, RiskLikelihood::Low, RiskStatus::Closed),
        record("RP-001", Reputation, RiskImpact::Critical, RiskLikelihood::Low, RiskStatus::Monitoring),
        record("RP-002", Reputation, RiskImpact::High, RiskLikelihood::High, RiskStatus::Open),
        record("SH-001", ShariaCompliance, RiskImpact::Critical, RiskLikelihood::Medium, RiskStatus::Open),
        record("SH-002", ShariaCompliance, RiskImpact::Medium, RiskLikelihood::Medium, RiskStatus::Open),
    ]
}

// ===========================================================================
// Severity classifier
// ===========================================================================

#[test]
fn test_every_pair_classifies_to_one_tier() {
    let mut seen = 0;
    for impact in IMPACT_AXIS {
        for likelihood in LIKELIHOOD_AXIS {
            let style = classify(impact, likelihood);
            assert!(SeverityTier::ALL.contains(&style.tier));
            assert_eq!(style.label, style.tier.label());
            seen += 1;
        }
    }
    assert_eq!(seen, 12);
}

// ===========================================================================
// Aggregation
// ===========================================================================

#[test]
fn test_category_status_counts_cover_every_combination() {
    for risks in [Vec::new(), register()] {
        let counts = count_by_category_and_status(&risks);
        assert_eq!(counts.len(), 3);
        let sum: usize = counts
            .iter()
            .map(|c| RiskStatus::ALL.iter().map(|s| c.count(*s)).sum::<usize>())
            .sum();
        assert_eq!(sum, risks.len());
    }
}

#[test]
fn test_sharia_display_name_in_counts() {
    let counts = count_by_category_and_status(&register());
    assert_eq!(counts[2].name, "Sharia Compliance");
    assert_eq!(counts[2].open, 2);
}

#[test]
fn test_high_priority_filter() {
    let risks = vec![
        record("A", RiskCategory::Operational, RiskImpact::Critical, RiskLikelihood::Low, RiskStatus::Open),
        record("B", RiskCategory::Operational, RiskImpact::Low, RiskLikelihood::Low, RiskStatus::Open),
        record("C", RiskCategory::Operational, RiskImpact::High, RiskLikelihood::Low, RiskStatus::Mitigated),
    ];
    let hp = high_priority(&risks);
    assert_eq!(hp.len(), 1);
    assert_eq!(hp[0].id, "A");
}

#[test]
fn test_matrix_places_every_record_once() {
    let risks = register();
    let matrix = bucket_by_matrix_cell(&risks);
    assert_eq!(matrix.cells.len(), 12);
    assert_eq!(matrix.total(), risks.len());

    let cell = matrix.cell(RiskImpact::Critical, RiskLikelihood::Medium);
    assert_eq!(cell.tier, SeverityTier::Severe);
    assert_eq!(cell.risks[0].id, "SH-001");
}

#[test]
fn test_kpis_for_register() {
    let kpis = build_kpis(&register(), &KpiConfig::default());
    assert_eq!(kpis[0].value, "7");
    assert_eq!(kpis[1].value, "3");
    assert_eq!(kpis[1].trend, KpiTrend::Stable);
    assert_eq!(kpis[2].value, "2");
    assert_eq!(kpis[2].trend, KpiTrend::Up);
    assert_eq!(kpis[3].value, "12 days");
}

// ===========================================================================
// Early warning
// ===========================================================================

#[test]
fn test_no_warnings_when_all_clear() {
    let risks: Vec<RiskRecord> = register()
        .into_iter()
        .filter(|r| r.impact != RiskImpact::Critical)
        .collect();
    let readings = RatioReadings {
        rha: dec!(10.0),
        acr: dec!(5.0),
    };
    assert!(evaluate_warnings(&risks, &readings, &EarlyWarningConfig::default()).is_empty());
}

#[test]
fn test_critical_then_rha_ordering() {
    let readings = RatioReadings {
        rha: dec!(14.8),
        acr: dec!(5.0),
    };
    let messages = evaluate_warnings(&register(), &readings, &EarlyWarningConfig::default());
    assert_eq!(
        messages,
        vec![
            "Terdapat risiko 'Kritis' yang masih berstatus 'Open'. Perlu penanganan segera."
                .to_string(),
            "Rasio Hak Amil (RHA) (14.8%) melebihi batas ideal (12.5%).".to_string(),
        ]
    );
}

// ===========================================================================
// Dashboard envelope
// ===========================================================================

#[test]
fn test_dashboard_from_json_input() {
    let raw = serde_json::json!({
        "risks": [
            {
                "id": "MN-001",
                "description": "Penyaluran zakat terlambat",
                "category": "Operational",
                "impact": "High",
                "likelihood": "High",
                "status": "Open"
            }
        ],
        "readings": { "rha": 9.5, "acr": 11.25 }
    });
    let input: DashboardInput = serde_json::from_value(raw).unwrap();
    assert_eq!(input.config, DashboardConfig::default());

    let out = build_dashboard(&input).unwrap();
    let s = &out.result;
    assert_eq!(s.total_risks, 1);
    assert_eq!(s.high_priority.len(), 1);
    assert_eq!(
        s.warnings,
        vec!["Saldo Kas Mengendap (ACR) (11.3%) melebihi batas ideal (10%).".to_string()]
    );
    assert_eq!(
        s.matrix
            .cell(RiskImpact::High, RiskLikelihood::High)
            .count(),
        1
    );
}

#[test]
fn test_manual_id_for_count_five() {
    assert_eq!(manual_risk_id(5), "MN-006");
}
