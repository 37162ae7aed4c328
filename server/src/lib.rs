pub mod chain;
pub mod client;
pub mod config;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod routes;
pub mod utils;
pub mod views;
pub mod wallet;

use std::sync::Arc;

use sqlx::PgPool;

use crate::chain::{ChainError, SandboxChain};
use crate::client::{MarketplaceClient, Submitter, TokenClient};
use crate::config::Config;
use crate::journal::TxJournal;
use crate::wallet::{SessionContext, Wallet};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: SessionContext,
    pub wallet: Wallet,
    pub marketplace: MarketplaceClient,
    pub token: TokenClient,
    pub journal: TxJournal,
}

impl AppState {
    /// Starts the sandbox ledger and wires the clients to it.
    pub async fn new(config: Config, pool: Option<PgPool>) -> Result<Self, ChainError> {
        let chain = SandboxChain::spawn().await?;
        let journal = TxJournal::new(pool);
        let submitter = Submitter::new(chain.clone(), journal.clone(), config.tx_timeout);

        Ok(Self {
            session: SessionContext::new(),
            wallet: Wallet::new(chain),
            marketplace: MarketplaceClient::new(submitter.clone(), config.approval_margin_percent),
            token: TokenClient::new(submitter),
            journal,
            config: Arc::new(config),
        })
    }
}
