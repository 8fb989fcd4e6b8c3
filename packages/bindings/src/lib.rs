use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use zis_risk_core::RiskRecord;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Risk collections arrive either bare or wrapped as `{"risks": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RiskCollection {
    Bare(Vec<RiskRecord>),
    Wrapped { risks: Vec<RiskRecord> },
}

fn parse_risks(input_json: &str) -> NapiResult<Vec<RiskRecord>> {
    let collection: RiskCollection = serde_json::from_str(input_json).map_err(to_napi_error)?;
    Ok(match collection {
        RiskCollection::Bare(risks) => risks,
        RiskCollection::Wrapped { risks } => risks,
    })
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[napi]
pub fn classify_severity(input_json: String) -> NapiResult<String> {
    let input: zis_risk_core::severity::ClassifyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = zis_risk_core::severity::classify_pair(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[napi]
pub fn risk_matrix(input_json: String) -> NapiResult<String> {
    let risks = parse_risks(&input_json)?;
    let matrix = zis_risk_core::aggregation::bucket_by_matrix_cell(&risks);
    serde_json::to_string(&matrix).map_err(to_napi_error)
}

#[napi]
pub fn category_counts(input_json: String) -> NapiResult<String> {
    let risks = parse_risks(&input_json)?;
    let counts = zis_risk_core::aggregation::count_by_category_and_status(&risks);
    serde_json::to_string(&counts).map_err(to_napi_error)
}

#[napi]
pub fn next_manual_risk_id(current_count: u32) -> String {
    zis_risk_core::taxonomy::manual_risk_id(current_count as usize)
}

// ---------------------------------------------------------------------------
// Early warning and dashboard
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_early_warnings(input_json: String) -> NapiResult<String> {
    let input: zis_risk_core::early_warning::EarlyWarningInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        zis_risk_core::early_warning::assess_early_warnings(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn dashboard_snapshot(input_json: String) -> NapiResult<String> {
    let input: zis_risk_core::dashboard::DashboardInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = zis_risk_core::dashboard::build_dashboard(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Compliance and ZIS
// ---------------------------------------------------------------------------

#[napi]
pub fn checklist_summary(input_json: String) -> NapiResult<String> {
    let input: zis_risk_core::compliance::ChecklistInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        zis_risk_core::compliance::summarize_checklist(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn zis_summary(input_json: String) -> NapiResult<String> {
    let input: zis_risk_core::zis::ZisTrackingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = zis_risk_core::zis::summarize_zis(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
