//! Typed clients for the marketplace and its payment token.
//!
//! State-changing calls go through [`Submitter`], which journals a receipt
//! for every transaction and waits for it to settle under a timeout.

pub mod marketplace;
pub mod token;

pub use marketplace::{MarketplaceClient, Purchase, PurchaseRoute};
pub use token::TokenClient;

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::chain::{ChainError, Sandbox, SandboxChain};
use crate::journal::TxJournal;
use crate::models::TxReceipt;
use crate::utils::error::AppError;
use crate::wallet::Signer;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Ticket {0} is not for sale")]
    NotForSale(u64),

    #[error("{0}")]
    Invalid(String),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Chain(e) => e.into(),
            ClientError::NotForSale(_) => AppError::Conflict(err.to_string()),
            ClientError::Invalid(msg) => AppError::ValidationError(msg),
        }
    }
}

/// Outcome of a settled transaction.
#[derive(Debug, Clone, Serialize)]
pub struct Settled<T> {
    pub result: T,
    pub receipt: TxReceipt,
}

#[derive(Clone)]
pub struct Submitter {
    chain: SandboxChain,
    journal: TxJournal,
    tx_timeout: Duration,
}

impl Submitter {
    pub fn new(chain: SandboxChain, journal: TxJournal, tx_timeout: Duration) -> Self {
        Self {
            chain,
            journal,
            tx_timeout,
        }
    }

    pub fn chain(&self) -> &SandboxChain {
        &self.chain
    }

    /// Submits `job` on behalf of `signer` and waits for it to settle.
    ///
    /// The transaction keeps running if the wait times out or is dropped; its
    /// receipt is journaled as soon as it settles.
    pub async fn submit<T, F>(
        &self,
        operation: &'static str,
        signer: &Signer,
        job: F,
    ) -> Result<Settled<T>, ChainError>
    where
        F: FnOnce(&mut Sandbox) -> Result<T, ChainError> + Send + 'static,
        T: Send + 'static,
    {
        let mut receipt = TxReceipt::pending(operation, signer.account());
        self.journal.record(&receipt).await;
        let tx_id = receipt.tx_id;

        let chain = self.chain.clone();
        let journal = self.journal.clone();
        let settlement = tokio::spawn(async move {
            let outcome = chain.run(job).await;
            match &outcome {
                Ok(_) => {
                    receipt.succeed();
                    let account = receipt.account.short();
                    info!(%tx_id, operation, %account, "Transaction settled");
                }
                Err(ChainError::Reverted { reason, .. }) => {
                    receipt.fail(reason.clone());
                    warn!(%tx_id, operation, reason = %reason, "Transaction reverted");
                }
                Err(e) => {
                    receipt.fail(e.to_string());
                    warn!(%tx_id, operation, error = %e, "Transaction failed");
                }
            }
            journal.record(&receipt).await;
            (outcome, receipt)
        });

        match timeout(self.tx_timeout, settlement).await {
            Ok(Ok((Ok(result), receipt))) => Ok(Settled { result, receipt }),
            Ok(Ok((Err(e), _))) => Err(e),
            Ok(Err(e)) => Err(ChainError::Host(e.to_string())),
            Err(_) => {
                warn!(%tx_id, operation, "Transaction did not settle in time");
                Err(ChainError::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxStatus;
    use crate::wallet::{SessionContext, Wallet};

    async fn signer(chain: &SandboxChain) -> Signer {
        SessionContext::new()
            .connect(&Wallet::new(chain.clone()), None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_journals_success_and_failure() {
        let chain = SandboxChain::spawn().await.unwrap();
        let journal = TxJournal::in_memory();
        let submitter = Submitter::new(chain.clone(), journal.clone(), Duration::from_secs(5));
        let signer = signer(&chain).await;

        let settled = submitter
            .submit("noop", &signer, |_| Ok(7u64))
            .await
            .unwrap();
        assert_eq!(settled.result, 7);
        assert_eq!(settled.receipt.status, TxStatus::Succeeded);

        let err = submitter
            .submit("verify_ticket", &signer, |sandbox| sandbox.verify_ticket(99))
            .await
            .unwrap_err();
        assert_eq!(err.revert_code(), Some(13));

        let recent = journal.recent(signer.account(), 10).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].status, TxStatus::Failed);
        assert_eq!(recent[0].reason.as_deref(), Some("Ticket does not exist"));
        assert_eq!(recent[1].tx_id, settled.receipt.tx_id);
    }

    #[tokio::test]
    async fn test_timeout_leaves_receipt_pending() {
        let chain = SandboxChain::spawn().await.unwrap();
        let journal = TxJournal::in_memory();
        let submitter = Submitter::new(chain.clone(), journal.clone(), Duration::from_millis(20));
        let signer = signer(&chain).await;

        let err = submitter
            .submit("slow", &signer, |_| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(err, ChainError::TimedOut);

        let recent = journal.recent(signer.account(), 1).await;
        assert_eq!(recent[0].status, TxStatus::Pending);

        // The ledger still settles the job afterwards.
        tokio::time::sleep(Duration::from_millis(600)).await;
        let recent = journal.recent(signer.account(), 1).await;
        assert_eq!(recent[0].status, TxStatus::Succeeded);
    }
}
