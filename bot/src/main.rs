use anyhow::Result;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};
mod commands;
mod state;

use crate::{
    commands::{handle_calc, handle_help, handle_start, handle_text, handle_version, Command},
    state::AppState,
};

fn schema() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_start))
        .branch(case![Command::Help].endpoint(handle_help))
        .branch(case![Command::Calc(input)].endpoint(handle_calc))
        .branch(case![Command::Version].endpoint(handle_version));

    Update::filter_message()
        .branch(command_handler)
        // Anything that is not a command may still be a positional-form
        // calculation ("0.5 0.48 0.52"); unrelated chatter gets no reply.
        .branch(dptree::endpoint(handle_text))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let app_state = Arc::new(AppState::new()?);
    tracing::info!(
        "Starting {} bot (seed: {} USDT, leverage: {}x, risk: {})...",
        app_state.bot_name,
        app_state.risk.seed,
        app_state.risk.leverage,
        app_state.risk.risk_fraction
    );

    let bot = Bot::new(&app_state.bot_token);

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![app_state.clone()])
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot is running and waiting for updates...");
    dispatcher.dispatch().await;

    Ok(())
}
