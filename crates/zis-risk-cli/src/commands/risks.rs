use clap::{Args, Subcommand};
use serde_json::{json, Value};

use zis_risk_core::dashboard::DashboardConfig;
use zis_risk_core::repository::HttpRiskRepository;
use zis_risk_core::store::RiskStore;
use zis_risk_core::taxonomy::RiskForm;
use zis_risk_core::{RiskCategory, RiskImpact, RiskLikelihood, RiskStatus, ZisRiskError};

use crate::RemoteArgs;

/// Manage the remote risk register
#[derive(Args)]
pub struct RisksArgs {
    #[command(subcommand)]
    pub command: RisksCommand,
}

#[derive(Subcommand)]
pub enum RisksCommand {
    /// List every risk in the register
    List,
    /// Log a new risk; it receives the next free MN- id
    Create(CreateRiskArgs),
    /// Edit an existing risk in place
    Update(UpdateRiskArgs),
    /// Delete a risk
    Delete(DeleteRiskArgs),
}

#[derive(Args)]
pub struct CreateRiskArgs {
    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "Operational")]
    pub category: RiskCategory,

    #[arg(long, default_value = "Low")]
    pub impact: RiskImpact,

    #[arg(long, default_value = "Low")]
    pub likelihood: RiskLikelihood,

    #[arg(long, default_value = "Open")]
    pub status: RiskStatus,
}

#[derive(Args)]
pub struct UpdateRiskArgs {
    /// Id of the risk to edit
    pub id: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<RiskCategory>,

    #[arg(long)]
    pub impact: Option<RiskImpact>,

    #[arg(long)]
    pub likelihood: Option<RiskLikelihood>,

    #[arg(long)]
    pub status: Option<RiskStatus>,
}

#[derive(Args)]
pub struct DeleteRiskArgs {
    /// Id of the risk to delete
    pub id: String,

    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

pub fn run_risks(
    args: RisksArgs,
    remote: &RemoteArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let RisksCommand::Delete(ref d) = args.command {
        if !d.yes {
            return Err(format!("refusing to delete {} without --yes", d.id).into());
        }
    }

    let store = RiskStore::new(remote.repository()?, config.clone());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(execute(store, args.command))
}

async fn execute(
    mut store: RiskStore<HttpRiskRepository>,
    command: RisksCommand,
) -> Result<Value, Box<dyn std::error::Error>> {
    store.load().await?;
    match command {
        RisksCommand::List => Ok(serde_json::to_value(store.risks())?),
        RisksCommand::Create(c) => {
            let form = RiskForm {
                id: None,
                description: c.description,
                category: c.category,
                impact: c.impact,
                likelihood: c.likelihood,
                status: c.status,
            };
            let created = store.save_risk(&form).await?;
            Ok(json!({ "result": created }))
        }
        RisksCommand::Update(u) => {
            let current = store
                .risks()
                .iter()
                .find(|r| r.id == u.id)
                .cloned()
                .ok_or_else(|| ZisRiskError::NotFound(format!("risk {}", u.id)))?;
            let form = RiskForm {
                id: Some(current.id),
                description: u.description.unwrap_or(current.description),
                category: u.category.unwrap_or(current.category),
                impact: u.impact.unwrap_or(current.impact),
                likelihood: u.likelihood.unwrap_or(current.likelihood),
                status: u.status.unwrap_or(current.status),
            };
            let updated = store.save_risk(&form).await?;
            Ok(json!({ "result": updated }))
        }
        RisksCommand::Delete(d) => {
            store.delete_risk(&d.id).await?;
            Ok(json!({ "result": { "deleted": d.id, "remaining": store.risks().len() } }))
        }
    }
}
