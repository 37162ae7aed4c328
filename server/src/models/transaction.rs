use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Pending,
    Succeeded,
    Failed,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Succeeded => "succeeded",
            TxStatus::Failed => "failed",
        }
    }
}

/// Record of one submitted transaction and how it settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxReceipt {
    pub tx_id: Uuid,
    pub operation: String,
    pub account: AccountId,
    pub status: TxStatus,
    pub reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl TxReceipt {
    pub fn pending(operation: &str, account: &AccountId) -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            operation: operation.to_string(),
            account: account.clone(),
            status: TxStatus::Pending,
            reason: None,
            submitted_at: Utc::now(),
            settled_at: None,
        }
    }

    pub fn succeed(&mut self) {
        self.status = TxStatus::Succeeded;
        self.settled_at = Some(Utc::now());
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = TxStatus::Failed;
        self.reason = Some(reason.into());
        self.settled_at = Some(Utc::now());
    }
}
