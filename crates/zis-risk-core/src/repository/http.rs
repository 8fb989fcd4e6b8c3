//! REST client for the risk backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{RepositoryConfig, RiskRepository};
use crate::error::ZisRiskError;
use crate::taxonomy::{RiskDraft, RiskPatch, RiskRecord};
use crate::zis::ZisStats;
use crate::ZisRiskResult;

const RISKS_PATH: &str = "/api/v1/risks";
const ZIS_STATS_PATH: &str = "/api/public/zis-stats";

/// JSON-over-HTTP repository. No retries are attempted.
#[derive(Debug, Clone)]
pub struct HttpRiskRepository {
    base_url: String,
    client: Client,
}

impl HttpRiskRepository {
    pub fn new(config: &RepositoryConfig) -> ZisRiskResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ZisRiskError::invalid("base_url", "Base URL cannot be empty"));
        }
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn risk_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, RISKS_PATH, id)
    }

    /// Public fund statistics shown on the institution's landing page.
    pub async fn zis_stats(&self) -> ZisRiskResult<ZisStats> {
        self.get(ZIS_STATS_PATH).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ZisRiskResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: String,
        body: &B,
    ) -> ZisRiskResult<T> {
        debug!("{} {}", method, url);
        let response = self.client.request(method, &url).json(body).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response) -> ZisRiskResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    warn!(
        status = status.as_u16(),
        url = %response.url(),
        "risk backend returned an error"
    );
    Err(ZisRiskError::Api {
        status: status.as_u16(),
        status_text,
    })
}

#[async_trait]
impl RiskRepository for HttpRiskRepository {
    async fn list(&self) -> ZisRiskResult<Vec<RiskRecord>> {
        let risks: Vec<RiskRecord> = self.get(RISKS_PATH).await?;
        info!(count = risks.len(), "loaded risks");
        Ok(risks)
    }

    async fn create(&self, draft: RiskDraft) -> ZisRiskResult<RiskRecord> {
        let created: RiskRecord = self
            .send_json(reqwest::Method::POST, self.url(RISKS_PATH), &draft)
            .await?;
        info!(id = %created.id, "created risk");
        Ok(created)
    }

    async fn update(&self, id: &str, patch: RiskPatch) -> ZisRiskResult<RiskRecord> {
        let updated: RiskRecord = self
            .send_json(reqwest::Method::PUT, self.risk_url(id), &patch)
            .await?;
        info!(id = %updated.id, "updated risk");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> ZisRiskResult<()> {
        let url = self.risk_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        info!(id, "deleted risk");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let repo = HttpRiskRepository::new(&RepositoryConfig {
            base_url: "http://risk.local:8080/".to_string(),
            timeout_secs: Some(5),
        })
        .unwrap();
        assert_eq!(repo.base_url(), "http://risk.local:8080");
        assert_eq!(
            repo.risk_url("MN-006"),
            "http://risk.local:8080/api/v1/risks/MN-006"
        );
        assert_eq!(
            repo.url(ZIS_STATS_PATH),
            "http://risk.local:8080/api/public/zis-stats"
        );
    }

    #[test]
    fn test_blank_base_url_rejected() {
        let err = HttpRiskRepository::new(&RepositoryConfig {
            base_url: "  ".to_string(),
            timeout_secs: None,
        })
        .unwrap_err();
        assert!(matches!(err, ZisRiskError::InvalidInput { .. }));
    }
}
