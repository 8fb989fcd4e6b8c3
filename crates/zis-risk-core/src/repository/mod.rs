//! Risk repository boundary.
//!
//! The store only talks to the [`RiskRepository`] trait. The HTTP client is
//! the production implementation; the in-memory one backs offline runs and
//! tests.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::taxonomy::{RiskDraft, RiskPatch, RiskRecord};
use crate::ZisRiskResult;

pub use http::HttpRiskRepository;
pub use memory::InMemoryRiskRepository;

/// CRUD contract over the remote risk collection. Every call may fail; a
/// failed call must leave caller state untouched.
#[async_trait]
pub trait RiskRepository: Send + Sync {
    async fn list(&self) -> ZisRiskResult<Vec<RiskRecord>>;

    /// The returned record carries the authoritative id.
    async fn create(&self, draft: RiskDraft) -> ZisRiskResult<RiskRecord>;

    async fn update(&self, id: &str, patch: RiskPatch) -> ZisRiskResult<RiskRecord>;

    async fn delete(&self, id: &str) -> ZisRiskResult<()>;
}

/// Connection settings for [`HttpRiskRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: None,
        }
    }
}
