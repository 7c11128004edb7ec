use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;

use crate::domain::{MarketSnapshot, TradeClose};

#[derive(Clone)]
pub struct Notifier {
    bot_token: Option<String>,
    chat_id: Option<String>,
    http: Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

impl Notifier {
    pub fn new(bot_token: Option<String>, chat_id: Option<String>) -> Self {
        Self {
            bot_token,
            chat_id,
            http: Client::new(),
        }
    }

    /// Sends a MarkdownV2 message. Missing credentials make this a no-op,
    /// so dev/test runs work without a Telegram bot.
    pub async fn alert(&self, text: &str) -> Result<()> {
        let (Some(token), Some(chat_id)) = (self.bot_token.as_deref(), self.chat_id.as_deref())
        else {
            return Ok(());
        };

        let url = format!("https://api.telegram.org/bot{token}/sendMessage");
        let resp = self
            .http
            .post(&url)
            .json(&SendMessage {
                chat_id,
                text,
                parse_mode: "MarkdownV2",
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow!("telegram sendMessage failed: {}", resp.status()));
        }

        Ok(())
    }
}

/// MarkdownV2 treats `.` and `-` as syntax; escape them in dynamic text.
fn escape_md(text: &str) -> String {
    text.replace('.', "\\.").replace('-', "\\-")
}

pub fn signal_message(snap: &MarketSnapshot, bonkbot_ref: &str) -> String {
    let link = format!(
        "https://t.me/bonkbot_bot?start={}_{}",
        bonkbot_ref, snap.token_address
    );
    let mcap = snap
        .market_cap_usd
        .map(|m| format!("{m:.0}"))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "\u{1F48E} *GOOD SIGNAL: {sym}*\n\n\
         \u{1F4B0} Mcap: ${mcap}\n\
         \u{1F4A7} Liq: ${liq}\n\
         \u{1F4C8} Vol: ${vol}\n\n\
         [\u{1F680} OPEN IN BONKBOT]({link})",
        sym = escape_md(&snap.symbol),
        mcap = escape_md(&mcap),
        liq = escape_md(&format!("{:.2}", snap.liquidity_usd)),
        vol = escape_md(&format!("{:.2}", snap.volume_h24_usd)),
    )
}

pub fn close_message(close: &TradeClose) -> String {
    format!(
        "\u{1F514} *PAPER TRADE CLOSED*\n\n\
         Token: {sym}\n\
         Result: {pnl}%\n\
         Exit Price: ${price}",
        sym = escape_md(&close.symbol),
        pnl = escape_md(&format!("{:.2}", close.pnl_pct)),
        price = escape_md(&format!("{:.8}", close.exit_price)),
    )
}
