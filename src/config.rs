use std::collections::HashSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Free-text DexScreener search queries, scanned in order each cycle.
    pub queries: Vec<String>,
    pub filters: FilterParams,
    /// Pair addresses rejected outright.
    pub blacklist: HashSet<String>,
    pub telegram: TelegramParams,
    pub paper: PaperParams,

    // Cadence
    pub scan_interval_secs: u64,
    pub query_pause_secs: u64,

    // Endpoints
    pub dexscreener_base_url: String,
    pub rugcheck_base_url: String,
    pub http_timeout_secs: u64,
    /// Risk lookups are best-effort and must not stall the cycle.
    pub risk_timeout_secs: u64,

    // Persistence
    pub journal_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterParams {
    pub min_liquidity_usd: f64,
    pub min_volume_h24_usd: f64,
    pub min_mcap_usd: f64,
    pub max_vlr: f64,
    pub max_bundled_supply_pct: f64,
    /// Policy for a risk report that carries no bundle ratio: `true`
    /// classifies it as BundledSupply, `false` lets it pass.
    pub missing_bundle_ratio_is_risk: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramParams {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub bonkbot_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperParams {
    pub enabled: bool,
    /// Informational in paper mode; no capital moves.
    pub buy_amount_sol: f64,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|x| x.parse().ok())
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let queries = env_list("DSE_QUERIES", &["pump", "moon", "solana"]);
        if queries.is_empty() {
            return Err(anyhow!("DSE_QUERIES resolved to an empty query list"));
        }

        let filters = FilterParams {
            min_liquidity_usd: env_parse::<f64>("DSE_MIN_LIQUIDITY_USD").unwrap_or(1000.0),
            min_volume_h24_usd: env_parse::<f64>("DSE_MIN_VOLUME_H24_USD").unwrap_or(5000.0),
            min_mcap_usd: env_parse::<f64>("DSE_MIN_MCAP_USD").unwrap_or(10000.0),
            max_vlr: env_parse::<f64>("DSE_MAX_VLR").unwrap_or(50.0),
            max_bundled_supply_pct: env_parse::<f64>("DSE_MAX_BUNDLED_SUPPLY_PCT").unwrap_or(25.0),
            missing_bundle_ratio_is_risk: env_bool("DSE_MISSING_BUNDLE_RATIO_IS_RISK", false),
        };
        if filters.max_vlr <= 0.0 {
            return Err(anyhow!("DSE_MAX_VLR must be positive"));
        }

        let blacklist: HashSet<String> = env_list(
            "DSE_BLACKLIST",
            &["0x0000000000000000000000000000000000000000"],
        )
        .into_iter()
        .collect();

        let telegram = TelegramParams {
            bot_token: std::env::var("TELEGRAM_BOT_TOKEN").ok().filter(|s| !s.is_empty()),
            chat_id: std::env::var("TELEGRAM_CHAT_ID").ok().filter(|s| !s.is_empty()),
            bonkbot_ref: std::env::var("DSE_BONKBOT_REF").unwrap_or_else(|_| "ref_code".to_string()),
        };

        let paper = PaperParams {
            enabled: env_bool("DSE_PAPER_TRADING", true),
            buy_amount_sol: env_parse::<f64>("DSE_BUY_AMOUNT_SOL").unwrap_or(0.1),
            take_profit_pct: env_parse::<f64>("DSE_TAKE_PROFIT_PCT").unwrap_or(50.0),
            stop_loss_pct: env_parse::<f64>("DSE_STOP_LOSS_PCT").unwrap_or(25.0),
        };
        if paper.take_profit_pct <= 0.0 || paper.stop_loss_pct <= 0.0 {
            return Err(anyhow!("take-profit/stop-loss percentages must be positive"));
        }

        let scan_interval_secs = env_parse::<u64>("DSE_SCAN_INTERVAL_SECS").unwrap_or(60);
        if scan_interval_secs == 0 {
            return Err(anyhow!("DSE_SCAN_INTERVAL_SECS must be positive"));
        }
        let query_pause_secs = env_parse::<u64>("DSE_QUERY_PAUSE_SECS").unwrap_or(5);

        let dexscreener_base_url = std::env::var("DSE_DEXSCREENER_BASE_URL")
            .unwrap_or_else(|_| "https://api.dexscreener.com".to_string());
        let rugcheck_base_url = std::env::var("DSE_RUGCHECK_BASE_URL")
            .unwrap_or_else(|_| "https://api.rugcheck.xyz/v1".to_string());
        let http_timeout_secs = env_parse::<u64>("DSE_HTTP_TIMEOUT_SECS").unwrap_or(10);
        let risk_timeout_secs = env_parse::<u64>("DSE_RISK_TIMEOUT_SECS").unwrap_or(5);

        let journal_path =
            std::env::var("DSE_JOURNAL_PATH").unwrap_or_else(|_| "./dex_data.jsonl".to_string());

        Ok(Self {
            queries,
            filters,
            blacklist,
            telegram,
            paper,
            scan_interval_secs,
            query_pause_secs,
            dexscreener_base_url,
            rugcheck_base_url,
            http_timeout_secs,
            risk_timeout_secs,
            journal_path,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults without touching the process environment.
    pub fn for_tests() -> Self {
        Self {
            queries: vec!["pump".into()],
            filters: FilterParams::for_tests(),
            blacklist: HashSet::new(),
            telegram: TelegramParams {
                bot_token: None,
                chat_id: None,
                bonkbot_ref: "ref_code".into(),
            },
            paper: PaperParams {
                enabled: true,
                buy_amount_sol: 0.1,
                take_profit_pct: 50.0,
                stop_loss_pct: 25.0,
            },
            scan_interval_secs: 60,
            query_pause_secs: 0,
            dexscreener_base_url: "http://localhost".into(),
            rugcheck_base_url: "http://localhost".into(),
            http_timeout_secs: 10,
            risk_timeout_secs: 5,
            journal_path: "./dex_data.jsonl".into(),
        }
    }
}

#[cfg(test)]
impl FilterParams {
    pub fn for_tests() -> Self {
        Self {
            min_liquidity_usd: 1000.0,
            min_volume_h24_usd: 5000.0,
            min_mcap_usd: 10000.0,
            max_vlr: 50.0,
            max_bundled_supply_pct: 25.0,
            missing_bundle_ratio_is_risk: false,
        }
    }
}
