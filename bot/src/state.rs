use shared::{Config, RiskConfig};

pub type HandlerResult = Result<(), anyhow::Error>;

#[derive(Clone)]
pub struct AppState {
    pub bot_token: String,
    pub bot_name: String,
    pub risk: RiskConfig,
}

impl AppState {
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;
        Ok(AppState {
            bot_token: config.bot_token,
            bot_name: config.bot_name,
            risk: config.risk,
        })
    }
}
