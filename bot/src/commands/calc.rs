//! The calculation intake: `/calc` with the keyed form, plain messages
//! with the positional form. Parse and validation errors are surfaced to
//! the chat unmodified.

use std::sync::Arc;
use teloxide::prelude::*;

use crate::state::{AppState, HandlerResult};
use shared::sizing::SizingRequest;
use shared::{parse_keyed, report, sizing, try_parse_positional};

/// Handler for the /calc command (keyed form).
pub async fn handle_calc(
    bot: Bot,
    msg: Message,
    input: String,
    state: Arc<AppState>,
) -> HandlerResult {
    let user_id = msg.from.as_ref().map(|f| f.id.0 as i64).unwrap_or(0);
    let input = input.trim();
    tracing::info!("Handling /calc for user {} with input: {:?}", user_id, input);

    if input.is_empty() {
        bot.send_message(
            msg.chat.id,
            "❌ No input provided.\n\nExample: <code>/calc e1:0.5 e2:0.48 stop:0.52</code>",
        )
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;
        return Ok(());
    }

    match parse_keyed(input) {
        Ok(request) => respond(&bot, &msg, &state, &request).await?,
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ Error: {}", e))
                .await?;
        }
    }

    Ok(())
}

/// Fallback handler for plain text messages (positional form). Messages
/// that do not look like 2 to 4 positive numbers are ignored.
pub async fn handle_text(bot: Bot, msg: Message, state: Arc<AppState>) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.starts_with('/') {
        return Ok(());
    }

    let Some(request) = try_parse_positional(text) else {
        return Ok(());
    };

    let user_id = msg.from.as_ref().map(|f| f.id.0 as i64).unwrap_or(0);
    tracing::info!(
        "Handling positional calculation for user {}: {:?}",
        user_id,
        text
    );

    respond(&bot, &msg, &state, &request).await
}

async fn respond(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    request: &SizingRequest,
) -> HandlerResult {
    match sizing::compute(&state.risk, request) {
        Ok(result) => {
            bot.send_message(msg.chat.id, report::render(&result))
                .parse_mode(teloxide::types::ParseMode::Html)
                .await?;
        }
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ Error: {}", e))
                .await?;
        }
    }
    Ok(())
}
