//! DexScreener REST client and wire types.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::MarketSnapshot;
use crate::feeds::MarketFeed;

#[derive(Clone)]
pub struct DexScreenerClient {
    base_url: String,
    http: Client,
}

impl DexScreenerClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch(&self, url: String) -> Result<SearchResponse> {
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl MarketFeed for DexScreenerClient {
    async fn search(&self, query: &str) -> Result<Vec<MarketSnapshot>> {
        let url = format!("{}/latest/dex/search?q={}", self.base_url, query);
        let resp = self.fetch(url).await?;
        // Pairs without a resolvable base-token address never reach the
        // classifier.
        Ok(resp
            .pairs
            .unwrap_or_default()
            .into_iter()
            .filter_map(Pair::into_snapshot)
            .collect())
    }

    async fn price_usd(&self, token_address: &str) -> Result<Option<f64>> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, token_address);
        let resp = self.fetch(url).await?;
        // First pair is authoritative for the token's current price.
        let price = resp
            .pairs
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|p| p.price_usd_f64())
            .filter(|p| *p > 0.0);
        Ok(price)
    }
}

// --- wire format ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    pairs: Option<Vec<Pair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pair {
    pair_address: Option<String>,
    base_token: Option<TokenInfo>,
    /// Decimal string upstream, e.g. "0.00001234".
    price_usd: Option<String>,
    liquidity: Option<Liquidity>,
    volume: Option<Volume>,
    price_change: Option<PriceChange>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    address: Option<String>,
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Liquidity {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    h24: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PriceChange {
    m5: Option<f64>,
}

impl Pair {
    fn price_usd_f64(&self) -> Option<f64> {
        self.price_usd.as_deref().and_then(|s| s.parse().ok())
    }

    fn into_snapshot(self) -> Option<MarketSnapshot> {
        let price_usd = self.price_usd_f64();
        let token = self.base_token?;
        let token_address = token.address.filter(|a| !a.is_empty())?;
        Some(MarketSnapshot {
            pair_address: self.pair_address.unwrap_or_default(),
            token_address,
            symbol: token.symbol.unwrap_or_default(),
            liquidity_usd: self.liquidity.and_then(|l| l.usd).unwrap_or(0.0),
            volume_h24_usd: self.volume.and_then(|v| v.h24).unwrap_or(0.0),
            market_cap_usd: self.market_cap,
            price_change_m5_pct: self.price_change.and_then(|c| c.m5),
            price_usd,
        })
    }
}
