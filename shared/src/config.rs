use std::str::FromStr;

use dotenv::dotenv;
use rust_decimal::Decimal;

use crate::sizing::RiskConfig;

pub struct Config {
    pub bot_token: String,
    pub bot_name: String,
    pub risk: RiskConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let seed = decimal_var("SEED_USDT", "2000")?;
        let leverage: u32 = std::env::var("LEVERAGE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid LEVERAGE: {e}"))?;
        let risk_fraction = decimal_var("RISK_FRACTION", "0.02")?;

        if seed <= Decimal::ZERO {
            anyhow::bail!("SEED_USDT must be positive");
        }
        if leverage == 0 {
            anyhow::bail!("LEVERAGE must be at least 1");
        }
        if risk_fraction <= Decimal::ZERO || risk_fraction >= Decimal::ONE {
            anyhow::bail!("RISK_FRACTION must be between 0 and 1");
        }

        tracing::info!(
            "Loaded risk config: seed={} USDT, leverage={}x, risk_fraction={}",
            seed,
            leverage,
            risk_fraction
        );

        Ok(Config {
            bot_token: std::env::var("BOT_TOKEN")?,
            bot_name: std::env::var("BOT_NAME").unwrap_or_else(|_| "SplitSizer".to_string()),
            risk: RiskConfig {
                seed,
                leverage,
                risk_fraction,
            },
        })
    }
}

fn decimal_var(name: &str, default: &str) -> Result<Decimal, anyhow::Error> {
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(&raw).map_err(|e| anyhow::anyhow!("invalid {name}: {e}"))
}
