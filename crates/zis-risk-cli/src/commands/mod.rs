pub mod aggregation;
pub mod compliance;
pub mod dashboard;
pub mod early_warning;
pub mod risks;
pub mod severity;
pub mod suggestion;
pub mod zis;
