//! Scan cycle controller.
//!
//! One cycle: search each configured query in order, classify every
//! returned pair, journal the outcome, open paper positions for
//! qualifying signals, then evaluate the ledger against current prices.
//! Queries are strictly sequential and the ledger is evaluated only after
//! the last query, so there is never a concurrent mutator.
//!
//! No failure in a cycle is fatal: a dead upstream degrades to idle
//! sleep/retry, never a crash.

use anyhow::Result;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::config::Config;
use crate::domain::{Classification, MarketSnapshot};
use crate::feeds::{MarketFeed, RiskFeed};
use crate::journal::ScanJournal;
use crate::ledger::{PaperTrade, TradeLedger};
use crate::notifier::{close_message, signal_message, Notifier};
use crate::time::Clock;

/// Per-cycle counters, logged at cycle end.
#[derive(Debug, Default)]
pub struct CycleStats {
    pub pairs_scanned: usize,
    pub signals: usize,
    pub trades_opened: usize,
    pub trades_closed: usize,
}

pub struct Scanner<F, R, C> {
    cfg: Config,
    feed: F,
    risk: R,
    clock: C,
    notifier: Notifier,
    journal: ScanJournal,
    ledger: TradeLedger,
}

impl<F, R, C> Scanner<F, R, C>
where
    F: MarketFeed,
    R: RiskFeed,
    C: Clock,
{
    pub fn new(cfg: Config, feed: F, risk: R, clock: C) -> Self {
        let notifier = Notifier::new(cfg.telegram.bot_token.clone(), cfg.telegram.chat_id.clone());
        let journal = ScanJournal::new(&cfg.journal_path);
        Self {
            cfg,
            feed,
            risk,
            clock,
            notifier,
            journal,
            ledger: TradeLedger::new(),
        }
    }

    /// Runs until the process is stopped externally.
    pub async fn run(mut self) -> Result<()> {
        info!(
            queries = self.cfg.queries.len(),
            paper = self.cfg.paper.enabled,
            interval_secs = self.cfg.scan_interval_secs,
            "scanner.start"
        );

        loop {
            let stats = self.run_cycle().await;
            info!(
                pairs = stats.pairs_scanned,
                signals = stats.signals,
                opened = stats.trades_opened,
                closed = stats.trades_closed,
                open_positions = self.ledger.len(),
                "cycle complete"
            );
            if !self.ledger.is_empty() {
                let held: Vec<&str> = self
                    .ledger
                    .open_trades()
                    .iter()
                    .map(|t| t.symbol.as_str())
                    .collect();
                debug!(?held, "holding paper positions");
            }
            sleep(Duration::from_secs(self.cfg.scan_interval_secs)).await;
        }
    }

    /// One full pass over the configured queries plus ledger evaluation.
    pub async fn run_cycle(&mut self) -> CycleStats {
        let mut stats = CycleStats::default();

        let queries = self.cfg.queries.clone();
        for query in &queries {
            info!(%query, "scanning");
            if let Err(e) = self.scan_query(query, &mut stats).await {
                warn!(%query, error = %e, "scan failed, moving to next query");
            }
            // Gap between queries keeps us under upstream rate limits.
            if self.cfg.query_pause_secs > 0 {
                sleep(Duration::from_secs(self.cfg.query_pause_secs)).await;
            }
        }

        if !self.ledger.is_empty() {
            stats.trades_closed = self.evaluate_ledger().await;
        }

        stats
    }

    async fn scan_query(&mut self, query: &str, stats: &mut CycleStats) -> Result<()> {
        let snapshots = self.feed.search(query).await?;

        for snap in snapshots {
            stats.pairs_scanned += 1;

            // Best-effort: a missing report classifies on heuristics alone.
            let report = match self.risk.report(&snap.token_address).await {
                Ok(r) => Some(r),
                Err(e) => {
                    debug!(token = %snap.token_address, error = %e, "risk lookup failed");
                    None
                }
            };

            let label = classify(&snap, report.as_ref(), &self.cfg.filters, &self.cfg.blacklist);

            if let Err(e) = self.journal.append(
                self.clock.now().timestamp(),
                &snap.pair_address,
                &snap.symbol,
                label,
            ) {
                warn!(error = %e, "journal append failed");
            }

            if label == Classification::GoodCandidate {
                self.handle_signal(&snap, stats).await;
            }
        }

        Ok(())
    }

    async fn handle_signal(&mut self, snap: &MarketSnapshot, stats: &mut CycleStats) {
        // Duplicate signal for a token we already hold: skip entirely.
        if self.ledger.contains(&snap.token_address) {
            return;
        }
        stats.signals += 1;
        info!(symbol = %snap.symbol, token = %snap.token_address, "signal");

        if self.cfg.paper.enabled {
            match snap.price_usd.filter(|p| *p > 0.0) {
                Some(price) => {
                    let trade = PaperTrade {
                        token_address: snap.token_address.clone(),
                        symbol: snap.symbol.clone(),
                        entry_price: price,
                        entry_time: self.clock.now(),
                    };
                    info!(
                        symbol = %snap.symbol,
                        price = format!("{price:.8}"),
                        entered_at = %trade.entry_time.to_rfc3339(),
                        "paper.enter"
                    );
                    if self.ledger.open_trade(trade) {
                        stats.trades_opened += 1;
                    }
                }
                None => {
                    warn!(symbol = %snap.symbol, "no usable entry price, skipping paper entry");
                }
            }
        }

        let msg = signal_message(snap, &self.cfg.telegram.bonkbot_ref);
        if let Err(e) = self.notifier.alert(&msg).await {
            warn!(error = %e, "signal notification failed");
        }
    }

    async fn evaluate_ledger(&mut self) -> usize {
        let closes = self
            .ledger
            .evaluate_all(
                &self.feed,
                self.cfg.paper.take_profit_pct,
                self.cfg.paper.stop_loss_pct,
            )
            .await;

        for close in &closes {
            info!(
                symbol = %close.symbol,
                outcome = %close.outcome,
                pnl_pct = format!("{:.2}", close.pnl_pct),
                "paper.exit"
            );
            if let Err(e) = self.notifier.alert(&close_message(close)).await {
                warn!(error = %e, "close notification failed");
            }
        }

        closes.len()
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }
}
