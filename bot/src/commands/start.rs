use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;

use crate::state::AppState;

/// Handler for the /start command: welcome text with usage examples and
/// the fixed sizing configuration.
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> Result<(), anyhow::Error> {
    let user_id = msg.from.as_ref().map(|f| f.id.0 as i64).unwrap_or(0);
    info!("Processing /start command from user {}", user_id);

    let risk = &state.risk;
    let risk_percent = (risk.risk_fraction * rust_decimal::Decimal::ONE_HUNDRED).normalize();

    let welcome = format!(
        "👋 <b>Welcome to the {name} split-entry risk calculator!</b>\n\
         \n\
         Send entry prices and a stop price and the bot computes the position\n\
         size that loses exactly {risk_percent}% of your seed if the stop is hit.\n\
         \n\
         📖 <b>How to use:</b>\n\
         \n\
         1️⃣ <b>One entry</b>\n\
         <code>/calc e1:0.5 stop:0.52</code>\n\
         \n\
         2️⃣ <b>Two entries</b>\n\
         <code>/calc e1:0.5 e2:0.48 stop:0.52</code>\n\
         \n\
         3️⃣ <b>Three entries</b>\n\
         <code>/calc e1:0.5 e2:0.48 e3:0.46 stop:0.52</code>\n\
         \n\
         💡 <b>Quick form</b> (space-separated)\n\
         <code>0.5 0.48 0.46 0.52</code>\n\
         → the last number is taken as the stop.\n\
         \n\
         ⚙️ <b>Configuration:</b>\n\
         • Seed: {seed} USDT (fixed)\n\
         • Leverage: {leverage}x (fixed)\n\
         • Risk: {risk_percent}% (fixed)\n\
         \n\
         ❓ Help: /help",
        name = state.bot_name,
        seed = risk.seed,
        leverage = risk.leverage,
        risk_percent = risk_percent,
    );

    bot.send_message(msg.chat.id, welcome)
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;

    Ok(())
}
