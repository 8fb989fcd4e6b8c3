pub mod checklist;

pub use checklist::{
    summarize_checklist, ChecklistInput, ChecklistOutput, ChecklistSummary, ComplianceChecklist, ComplianceItem,
};
