use clap::Args;
use serde_json::Value;

use zis_risk_core::compliance::{self, ChecklistInput};

use crate::input;

/// Arguments for the DPS compliance checklist
#[derive(Args)]
pub struct ChecklistArgs {
    /// Path to JSON or YAML input file; the standard Sharia checklist is used otherwise
    #[arg(long)]
    pub input: Option<String>,

    /// Toggle the item with this id (repeatable)
    #[arg(long)]
    pub toggle: Vec<String>,

    /// Append an item with this description (repeatable)
    #[arg(long)]
    pub add: Vec<String>,
}

pub fn run_checklist(args: ChecklistArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut checklist_input: ChecklistInput = input::read_optional_input(args.input.as_deref())?
        .unwrap_or_else(|| ChecklistInput {
            items: None,
            toggle: Vec::new(),
            add: Vec::new(),
        });
    checklist_input.add.extend(args.add);
    checklist_input.toggle.extend(args.toggle);

    let result = compliance::summarize_checklist(&checklist_input)?;
    Ok(serde_json::to_value(result)?)
}
