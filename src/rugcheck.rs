//! Rugcheck token-report client.
//!
//! Runs with a shorter timeout than the market feed: the lookup is
//! best-effort and must not stall the scan cycle.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::{RiskReport, RiskStatus};
use crate::feeds::RiskFeed;

#[derive(Clone)]
pub struct RugcheckClient {
    base_url: String,
    http: Client,
}

impl RugcheckClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl RiskFeed for RugcheckClient {
    async fn report(&self, token_address: &str) -> Result<RiskReport> {
        let url = format!("{}/tokens/{}/report", self.base_url, token_address);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let raw: RawReport = resp.json().await?;
        Ok(raw.into_report())
    }
}

#[derive(Debug, Deserialize)]
struct RawReport {
    status: Option<String>,
    file_meta: Option<FileMeta>,
}

#[derive(Debug, Deserialize)]
struct FileMeta {
    bundle_ratio: Option<f64>,
}

impl RawReport {
    fn into_report(self) -> RiskReport {
        let status = match self.status.as_deref() {
            Some("good") => RiskStatus::Good,
            Some(_) => RiskStatus::Flagged,
            None => RiskStatus::Unknown,
        };
        RiskReport {
            status,
            bundle_ratio: self.file_meta.and_then(|m| m.bundle_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let raw: RawReport =
            serde_json::from_value(serde_json::json!({ "status": "good" })).unwrap();
        assert_eq!(raw.into_report().status, RiskStatus::Good);

        let raw: RawReport =
            serde_json::from_value(serde_json::json!({ "status": "danger" })).unwrap();
        assert_eq!(raw.into_report().status, RiskStatus::Flagged);

        let raw: RawReport = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(raw.into_report().status, RiskStatus::Unknown);
    }

    #[test]
    fn bundle_ratio_passthrough() {
        let raw: RawReport = serde_json::from_value(serde_json::json!({
            "status": "good",
            "file_meta": { "bundle_ratio": 0.42 }
        }))
        .unwrap();
        assert_eq!(raw.into_report().bundle_ratio, Some(0.42));

        let raw: RawReport = serde_json::from_value(serde_json::json!({
            "status": "good",
            "file_meta": {}
        }))
        .unwrap();
        assert_eq!(raw.into_report().bundle_ratio, None);
    }
}
