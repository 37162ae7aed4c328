//! Record of submitted transactions: a bounded in-memory buffer, mirrored to
//! Postgres when a database is configured.

use std::collections::VecDeque;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::{AccountId, TxReceipt};

pub const JOURNAL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct TxJournal {
    pool: Option<PgPool>,
    recent: Arc<Mutex<VecDeque<TxReceipt>>>,
}

impl TxJournal {
    pub fn new(pool: Option<PgPool>) -> Self {
        Self {
            pool,
            recent: Arc::new(Mutex::new(VecDeque::with_capacity(JOURNAL_CAPACITY))),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Stores the latest state of `receipt`, replacing an earlier state of the same transaction.
    pub async fn record(&self, receipt: &TxReceipt) {
        {
            let mut recent = self.recent.lock().await;
            match recent.iter_mut().find(|r| r.tx_id == receipt.tx_id) {
                Some(existing) => *existing = receipt.clone(),
                None => {
                    if recent.len() == JOURNAL_CAPACITY {
                        recent.pop_front();
                    }
                    recent.push_back(receipt.clone());
                }
            }
        }

        if let Some(pool) = &self.pool {
            if let Err(e) = persist(pool, receipt).await {
                warn!(tx_id = %receipt.tx_id, error = ?e, "Failed to journal transaction");
            } else {
                debug!(tx_id = %receipt.tx_id, "Transaction journaled");
            }
        }
    }

    /// Most recent receipts for `account`, newest first.
    pub async fn recent(&self, account: &AccountId, limit: usize) -> Vec<TxReceipt> {
        self.recent
            .lock()
            .await
            .iter()
            .rev()
            .filter(|r| &r.account == account)
            .take(limit)
            .cloned()
            .collect()
    }
}

async fn persist(pool: &PgPool, receipt: &TxReceipt) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO transactions (id, operation, account, status, reason, submitted_at, settled_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE
        SET status = EXCLUDED.status,
            reason = EXCLUDED.reason,
            settled_at = EXCLUDED.settled_at
        "#,
    )
    .bind(receipt.tx_id)
    .bind(&receipt.operation)
    .bind(receipt.account.as_str())
    .bind(receipt.status.as_str())
    .bind(receipt.reason.as_deref())
    .bind(receipt.submitted_at)
    .bind(receipt.settled_at)
    .execute(pool)
    .await?;
    Ok(())
}
