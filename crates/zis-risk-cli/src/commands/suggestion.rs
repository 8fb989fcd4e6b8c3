use clap::Args;
use serde_json::{json, Value};

use zis_risk_core::dashboard::DashboardConfig;
use zis_risk_core::repository::HttpRiskRepository;
use zis_risk_core::store::RiskStore;
use zis_risk_core::suggestion::{materialize_suggestions, RiskSuggester, ScriptedSuggester};
use zis_risk_core::{RiskRecord, ZisRiskResult};

use crate::RemoteArgs;

/// Arguments for assistant risk identification
#[derive(Args)]
pub struct SuggestArgs {
    /// Free-text scenario to analyse
    #[arg(long)]
    pub scenario: String,

    /// Current number of risks; suggestions are numbered from count + 1
    #[arg(long, default_value = "0")]
    pub count: usize,

    /// Seed for the scripted assistant
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability that the scripted assistant fails
    #[arg(long, default_value = "0.1")]
    pub failure_rate: f64,

    /// Save the suggestions to the remote register
    #[arg(long)]
    pub persist: bool,
}

pub fn run_suggest(
    args: SuggestArgs,
    remote: &RemoteArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let suggester = ScriptedSuggester::new(args.seed).with_failure_rate(args.failure_rate)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let records = if args.persist {
        let store = RiskStore::new(remote.repository()?, config.clone());
        runtime.block_on(persist(store, &suggester, &args.scenario))?
    } else {
        let suggestions = runtime.block_on(suggester.identify_risks(&args.scenario))?;
        materialize_suggestions(suggestions, args.count + 1)
    };
    Ok(json!({ "result": records }))
}

async fn persist(
    mut store: RiskStore<HttpRiskRepository>,
    suggester: &ScriptedSuggester,
    scenario: &str,
) -> ZisRiskResult<Vec<RiskRecord>> {
    store.load().await?;
    store.suggest(suggester, scenario).await
}
