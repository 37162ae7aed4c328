//! Sandbox wallet provider and the process-wide session built on it.

pub mod session;

pub use session::{SessionContext, SessionError, SessionState, Signer};

use tracing::info;

use crate::chain::{ChainError, SandboxChain};
use crate::models::AccountId;

/// Hands out ledger accounts, the way a browser wallet extension would.
#[derive(Clone)]
pub struct Wallet {
    chain: SandboxChain,
}

impl Wallet {
    pub fn new(chain: SandboxChain) -> Self {
        Self { chain }
    }

    /// Grants access to `account`, or to a freshly created account when none is named.
    pub async fn request_access(&self, account: Option<AccountId>) -> Result<AccountId, ChainError> {
        let granted = self
            .chain
            .run(move |sandbox| match account {
                Some(account) if sandbox.has_account(&account) => Ok(account),
                Some(account) => Err(ChainError::UnknownAccount(account.to_string())),
                None => Ok(sandbox.create_account()),
            })
            .await?;

        info!(account = %granted.short(), "Wallet access granted");
        Ok(granted)
    }

    pub async fn accounts(&self) -> Result<Vec<AccountId>, ChainError> {
        self.chain.run(|sandbox| Ok(sandbox.accounts())).await
    }
}
