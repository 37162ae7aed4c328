use std::fmt;

use serde::{Deserialize, Serialize};

/// A ledger address in its strkey form.
///
/// Wallet accounts on the sandbox ledger are generated by the test host, which
/// issues contract-style `C...` strkeys for them just as for deployed contracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines, e.g. `CABC12...`.
    pub fn short(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}
