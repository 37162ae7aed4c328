use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::chain::amount::Amount;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_APPROVAL_MARGIN_PERCENT: u32 = 150;
const DEFAULT_FAUCET_TCOIN: i64 = 1000;
const DEFAULT_TX_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Postgres journal; receipts stay in memory only when unset.
    pub database_url: Option<String>,
    /// Allowance granted before a purchase, as a percentage of the ticket price.
    pub approval_margin_percent: u32,
    /// Demo TCOIN minted to an empty wallet by the faucet.
    pub faucet_amount: Amount,
    pub tx_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            database_url: None,
            approval_margin_percent: DEFAULT_APPROVAL_MARGIN_PERCENT,
            faucet_amount: Amount::from_tcoin(Decimal::from(DEFAULT_FAUCET_TCOIN))
                .unwrap_or_default(),
            tx_timeout: Duration::from_secs(DEFAULT_TX_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = parse_var("BIND_ADDR")?.unwrap_or(defaults.bind_addr);
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let approval_margin_percent = parse_var("APPROVAL_MARGIN_PERCENT")?
            .unwrap_or(defaults.approval_margin_percent);
        let faucet_amount = match parse_var::<Decimal>("FAUCET_AMOUNT")? {
            Some(tcoin) => Amount::from_tcoin(tcoin).map_err(|_| ConfigError::Invalid {
                key: "FAUCET_AMOUNT",
                value: tcoin.to_string(),
            })?,
            None => defaults.faucet_amount,
        };
        let tx_timeout = parse_var("TX_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.tx_timeout);

        Ok(Self {
            bind_addr,
            database_url,
            approval_margin_percent,
            faucet_amount,
            tx_timeout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.approval_margin_percent, 150);
        assert_eq!(config.faucet_amount, Amount::from_units(1000 * 10_000_000));
        assert_eq!(config.tx_timeout, Duration::from_secs(30));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_value_is_reported() {
        std::env::set_var("APPROVAL_MARGIN_PERCENT", "lots");
        let result = Config::from_env();
        std::env::remove_var("APPROVAL_MARGIN_PERCENT");

        match result {
            Err(ConfigError::Invalid { key, value }) => {
                assert_eq!(key, "APPROVAL_MARGIN_PERCENT");
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid config, got {:?}", other),
        }
    }
}
