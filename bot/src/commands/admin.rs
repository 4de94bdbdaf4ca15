use std::sync::Arc;
use std::time::Instant;
use teloxide::prelude::*;

use crate::state::AppState;

/// Handler for the /version command to check the current git version of
/// the bot. GIT_HASH, GIT_BRANCH, GIT_TAG and BUILD_TIME are embedded at
/// compile time by build.rs.
pub async fn handle_version(
    bot: Bot,
    msg: Message,
    _state: Arc<AppState>,
) -> Result<(), anyhow::Error> {
    let start_time = Instant::now();
    let user_id = msg.from.as_ref().map(|f| f.id.0 as i64).unwrap_or(0);

    tracing::info!("Handling /version command for user_id={}", user_id);

    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let git_branch = option_env!("GIT_BRANCH").unwrap_or("unknown");
    let git_tag = option_env!("GIT_TAG").unwrap_or("unknown");

    // BUILD_TIME is a unix epoch; format it as human-readable if possible.
    let build_time_raw = option_env!("BUILD_TIME").unwrap_or("unknown");
    let build_time_human = if let Ok(epoch) = build_time_raw.parse::<u64>() {
        use chrono::{TimeZone, Utc};
        match Utc.timestamp_opt(epoch as i64, 0).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => build_time_raw.to_string(),
        }
    } else {
        build_time_raw.to_string()
    };

    let version_info = format!(
        "✅ 🤖 <b>Bot Version</b> \n\
        <b>Branch:</b> <code>{}</code>\n\
        <b>Tag:</b> <code>{}</code>\n\
        <b>Commit:</b> <code>{}</code>\n\
        <b>Build Time:</b> <code>{}</code>\n\
        <b>OS:</b> <code>{}</code>",
        git_branch,
        git_tag,
        git_hash,
        build_time_human,
        option_env!("CARGO_CFG_TARGET_OS").unwrap_or("unknown")
    );

    bot.send_message(msg.chat.id, version_info)
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;

    let duration = start_time.elapsed();
    tracing::info!("Time taken to handle /version command: {:?}", duration);
    Ok(())
}
