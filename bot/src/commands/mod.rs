use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

use crate::state::AppState;

pub mod admin;
pub mod calc;
pub mod start;

pub use admin::handle_version;
pub use calc::{handle_calc, handle_text};
pub use start::handle_start;

/// 🤖 <b>SplitSizer</b> 🧮 — pick one of the commands below
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Start using the bot
    Start,
    /// Show usage help
    Help,
    /// Calculate position sizes, e.g. /calc e1:0.5 stop:0.52
    Calc(String),
    /// What is the current version?
    Version,
}

pub async fn handle_help(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let start_time = Instant::now();

    let from = msg.from.as_ref();
    tracing::info!(
        "Handling /help command for user: {:?} (id: {:?})",
        from.map(|f| f.full_name()),
        from.map(|f| f.id.0)
    );

    let risk = &state.risk;
    let help_text = format!(
        "📚 <b>Help</b>\n\
         \n\
         <b>Command form:</b>\n\
         <code>/calc e1:&lt;entry1&gt; e2:&lt;entry2&gt; e3:&lt;entry3&gt; stop:&lt;stop&gt;</code>\n\
         \n\
         <b>Examples:</b>\n\
         • <code>/calc e1:0.5 stop:0.52</code>\n\
         • <code>/calc e1:0.5 e2:0.48 stop:0.52</code>\n\
         • <code>/calc e1:0.5 e2:0.48 e3:0.46 stop:0.52</code>\n\
         \n\
         <b>Quick form:</b>\n\
         Send 2 to 4 numbers separated by spaces; the last one is taken as the stop.\n\
         Example: <code>0.5 0.48 0.46 0.52</code>\n\
         → E1: 0.5, E2: 0.48, E3: 0.46, Stop: 0.52\n\
         \n\
         <b>Notes:</b>\n\
         • 1 to 3 entry prices, stop is required, all values must be positive.\n\
         • Seed: {} USDT, leverage: {}x, risk: {} — fixed per deployment.\n\
         \n\
         Commands: /start /help /calc /version",
        risk.seed, risk.leverage, risk.risk_fraction
    );

    bot.send_message(msg.chat.id, help_text)
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;

    let duration = start_time.elapsed();
    tracing::info!("Time taken to handle /help command: {:?}", duration);
    Ok(())
}
