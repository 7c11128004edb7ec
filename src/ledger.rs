//! Paper-trade ledger.
//!
//! At most one open position per token address. Positions have no partial
//! states: they exist from open until an exit threshold removes them.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{TradeClose, TradeOutcome};
use crate::feeds::MarketFeed;

#[derive(Debug, Clone)]
pub struct PaperTrade {
    pub token_address: String,
    pub symbol: String,
    /// USD, > 0. Zero-price snapshots are rejected before open.
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct TradeLedger {
    open: Vec<PaperTrade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn contains(&self, token_address: &str) -> bool {
        self.open.iter().any(|t| t.token_address == token_address)
    }

    pub fn open_trades(&self) -> &[PaperTrade] {
        &self.open
    }

    /// Inserts the trade unless the address already holds an open position.
    /// Returns whether the trade was inserted.
    pub fn open_trade(&mut self, trade: PaperTrade) -> bool {
        if self.contains(&trade.token_address) {
            return false;
        }
        self.open.push(trade);
        true
    }

    /// Checks every open position against the current price and closes the
    /// ones that crossed an exit bound.
    ///
    /// A failed lookup or a missing/non-positive price skips the position
    /// for this pass. Closes are collected while iterating and removed
    /// afterwards, so removal cannot disturb evaluation of the remaining
    /// positions.
    pub async fn evaluate_all<F: MarketFeed + ?Sized>(
        &mut self,
        feed: &F,
        take_profit_pct: f64,
        stop_loss_pct: f64,
    ) -> Vec<TradeClose> {
        let mut closes = Vec::new();

        for trade in &self.open {
            let price = match feed.price_usd(&trade.token_address).await {
                Ok(Some(p)) if p > 0.0 => p,
                Ok(_) => {
                    debug!(symbol = %trade.symbol, "no usable price this pass");
                    continue;
                }
                Err(e) => {
                    debug!(symbol = %trade.symbol, error = %e, "price lookup failed");
                    continue;
                }
            };

            let pnl_pct = (price - trade.entry_price) / trade.entry_price * 100.0;
            info!(symbol = %trade.symbol, pnl_pct = format!("{pnl_pct:.2}"), "paper.pnl");

            if pnl_pct >= take_profit_pct || pnl_pct <= -stop_loss_pct {
                let outcome = if pnl_pct > 0.0 {
                    TradeOutcome::Profit
                } else {
                    TradeOutcome::Loss
                };
                closes.push(TradeClose {
                    token_address: trade.token_address.clone(),
                    symbol: trade.symbol.clone(),
                    pnl_pct,
                    exit_price: price,
                    outcome,
                });
            }
        }

        if !closes.is_empty() {
            self.open
                .retain(|t| !closes.iter().any(|c| c.token_address == t.token_address));
        }

        closes
    }
}
