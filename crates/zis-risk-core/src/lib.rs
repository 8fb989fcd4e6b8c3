pub mod error;
pub mod types;

pub mod taxonomy;

#[cfg(feature = "classification")]
pub mod severity;

#[cfg(feature = "aggregation")]
pub mod aggregation;

#[cfg(feature = "early_warning")]
pub mod early_warning;

#[cfg(feature = "compliance")]
pub mod compliance;

#[cfg(feature = "zis")]
pub mod zis;

#[cfg(all(feature = "aggregation", feature = "early_warning"))]
pub mod dashboard;

#[cfg(feature = "client")]
pub mod repository;

#[cfg(feature = "client")]
pub mod suggestion;

#[cfg(feature = "client")]
pub mod store;

pub use error::ZisRiskError;
pub use taxonomy::{RiskCategory, RiskImpact, RiskLikelihood, RiskRecord, RiskStatus};
pub use types::*;

/// Standard result type for all zis-risk operations
pub type ZisRiskResult<T> = Result<T, ZisRiskError>;
