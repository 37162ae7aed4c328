use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::chain::ChainError;
use crate::models::AccountId;
use crate::utils::error::AppError;
use crate::wallet::Wallet;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No wallet connected. Connect a wallet first.")]
    NotConnected,
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::AuthError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Disconnected,
    Active {
        account: AccountId,
        connected_at: DateTime<Utc>,
    },
}

/// Account that authorizes transactions for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    account: AccountId,
}

impl Signer {
    pub(crate) fn new(account: AccountId) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }
}

/// The single wallet session shared by every request.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Disconnected)),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Asks the wallet for access and makes the granted account active.
    /// Replaces any previously active account.
    pub async fn connect(
        &self,
        wallet: &Wallet,
        account: Option<AccountId>,
    ) -> Result<Signer, ChainError> {
        let account = wallet.request_access(account).await?;

        let mut state = self.state.write().await;
        *state = SessionState::Active {
            account: account.clone(),
            connected_at: Utc::now(),
        };
        info!(account = %account.short(), "Session connected");

        Ok(Signer::new(account))
    }

    /// Returns whether a session was active.
    pub async fn disconnect(&self) -> bool {
        let mut state = self.state.write().await;
        let was_active = matches!(*state, SessionState::Active { .. });
        *state = SessionState::Disconnected;
        if was_active {
            info!("Session disconnected");
        }
        was_active
    }

    pub async fn signer(&self) -> Result<Signer, SessionError> {
        match &*self.state.read().await {
            SessionState::Active { account, .. } => Ok(Signer::new(account.clone())),
            SessionState::Disconnected => Err(SessionError::NotConnected),
        }
    }
}
