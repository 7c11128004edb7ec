use serde::{Deserialize, Serialize};

/// One observed trading pair at a point in time. Produced fresh each poll;
/// never persisted (only the classification outcome is journaled).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub pair_address: String,
    pub token_address: String,
    pub symbol: String,
    pub liquidity_usd: f64,
    pub volume_h24_usd: f64,
    pub market_cap_usd: Option<f64>,
    pub price_change_m5_pct: Option<f64>,
    pub price_usd: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskStatus {
    Good,
    Flagged,
    Unknown,
}

/// Best-effort token risk report. Absent entirely when the lookup fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub status: RiskStatus,
    /// Fraction of supply held under a single distribution pattern, 0.0..=1.0.
    pub bundle_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Classification {
    Blacklisted,
    RugcheckRisk,
    BundledSupply,
    FakeVolume,
    LowLiquidity,
    LowVolume,
    LowMcap,
    GoodCandidate,
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Blacklisted => "Blacklisted",
            Classification::RugcheckRisk => "RugcheckRisk",
            Classification::BundledSupply => "BundledSupply",
            Classification::FakeVolume => "FakeVolume",
            Classification::LowLiquidity => "LowLiquidity",
            Classification::LowVolume => "LowVolume",
            Classification::LowMcap => "LowMcap",
            Classification::GoodCandidate => "GoodCandidate",
            Classification::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradeOutcome {
    Profit,
    Loss,
}

impl std::fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeOutcome::Profit => f.write_str("PROFIT"),
            TradeOutcome::Loss => f.write_str("LOSS"),
        }
    }
}

/// Emitted by the ledger when a paper position crosses an exit threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeClose {
    pub token_address: String,
    pub symbol: String,
    pub pnl_pct: f64,
    pub exit_price: f64,
    pub outcome: TradeOutcome,
}
