//! Access to the ledger that hosts the marketplace and its payment token.

pub mod amount;
pub mod sandbox;

pub use sandbox::{Sandbox, SandboxChain};

use thiserror::Error;
use ticket_marketplace::MarketplaceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The contract rejected the call. `reason` is safe to show to users.
    #[error("transaction reverted: {reason}")]
    Reverted { code: Option<u32>, reason: String },

    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("unexpected contract response: {0}")]
    Decode(String),

    #[error("ledger host error: {0}")]
    Host(String),

    #[error("transaction did not settle in time")]
    TimedOut,

    #[error("ledger is unavailable")]
    Unavailable,
}

impl ChainError {
    pub fn revert_code(&self) -> Option<u32> {
        match self {
            ChainError::Reverted { code, .. } => *code,
            _ => None,
        }
    }

    /// True when the contract rejected the call with `error`.
    pub fn is(&self, error: MarketplaceError) -> bool {
        self.revert_code() == Some(error as u32)
    }
}

impl From<MarketplaceError> for ChainError {
    fn from(error: MarketplaceError) -> Self {
        ChainError::Reverted {
            code: Some(error as u32),
            reason: error.reason().to_string(),
        }
    }
}

/// Errors raised by the payment token or the host itself, outside the marketplace's own codes.
impl From<soroban_sdk::Error> for ChainError {
    fn from(error: soroban_sdk::Error) -> Self {
        ChainError::Reverted {
            code: None,
            reason: format!("Ledger rejected the call: {:?}", error),
        }
    }
}
