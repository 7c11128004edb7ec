//! External data feeds.
//!
//! The controller and ledger only see these traits; the concrete
//! DexScreener and Rugcheck clients live in their own modules. Tests
//! substitute in-memory implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{MarketSnapshot, RiskReport};

/// Market search + current-price source.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Free-text search; returns the candidate snapshots for one query.
    async fn search(&self, query: &str) -> Result<Vec<MarketSnapshot>>;

    /// Current USD price for a token, `None` when the feed has no usable
    /// quote right now (transient gaps are not errors).
    async fn price_usd(&self, token_address: &str) -> Result<Option<f64>>;
}

/// Token risk-report source. Failures are expected and non-fatal; callers
/// degrade to heuristics-only classification.
#[async_trait]
pub trait RiskFeed: Send + Sync {
    async fn report(&self, token_address: &str) -> Result<RiskReport>;
}
