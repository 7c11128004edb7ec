mod classifier;
mod config;
mod dexscreener;
mod domain;
mod feeds;
mod journal;
mod ledger;
mod monitoring;
mod notifier;
mod rugcheck;
mod scanner;
mod time;

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present (no-op in prod/systemd envs)
    let _ = dotenvy::dotenv();

    monitoring::init_tracing();

    let cfg = config::Config::from_env()?;
    info!(?cfg, "boot");

    let feed = dexscreener::DexScreenerClient::new(
        cfg.dexscreener_base_url.clone(),
        cfg.http_timeout_secs,
    )?;
    let risk = rugcheck::RugcheckClient::new(cfg.rugcheck_base_url.clone(), cfg.risk_timeout_secs)?;

    let scanner = scanner::Scanner::new(cfg, feed, risk, time::SystemClock);
    scanner.run().await
}
