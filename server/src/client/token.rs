use tracing::{debug, info};

use crate::chain::amount::Amount;
use crate::chain::{ChainError, SandboxChain};
use crate::client::{Settled, Submitter};
use crate::models::AccountId;
use crate::wallet::Signer;

/// The TCOIN payment token.
#[derive(Clone)]
pub struct TokenClient {
    submitter: Submitter,
}

impl TokenClient {
    pub fn new(submitter: Submitter) -> Self {
        Self { submitter }
    }

    fn chain(&self) -> &SandboxChain {
        self.submitter.chain()
    }

    pub async fn balance_of(&self, account: &AccountId) -> Result<Amount, ChainError> {
        let account = account.clone();
        self.chain().run(move |sandbox| sandbox.balance(&account)).await
    }

    /// Allowance the signer has granted the marketplace.
    pub async fn allowance(&self, signer: &Signer) -> Result<Amount, ChainError> {
        let owner = signer.account().clone();
        self.chain().run(move |sandbox| sandbox.allowance(&owner)).await
    }

    /// Lets the marketplace spend up to `amount` on the signer's behalf.
    ///
    /// Resolves only once the approval has settled, so a purchase issued after
    /// it sees the new allowance.
    pub async fn approve(&self, signer: &Signer, amount: Amount) -> Result<Settled<()>, ChainError> {
        let owner = signer.account().clone();
        debug!(owner = %owner.short(), %amount, "Approving marketplace allowance");
        self.submitter
            .submit("approve", signer, move |sandbox| sandbox.approve(&owner, amount))
            .await
    }

    pub async fn transfer(
        &self,
        signer: &Signer,
        to: &AccountId,
        amount: Amount,
    ) -> Result<Settled<()>, ChainError> {
        let from = signer.account().clone();
        let to = to.clone();
        self.submitter
            .submit("transfer", signer, move |sandbox| {
                sandbox.transfer(&from, &to, amount)
            })
            .await
    }

    /// Mints demo tokens to the signer. Only possible on the sandbox ledger.
    pub async fn mint(&self, signer: &Signer, amount: Amount) -> Result<Settled<()>, ChainError> {
        let to = signer.account().clone();
        self.submitter
            .submit("mint", signer, move |sandbox| sandbox.mint(&to, amount))
            .await
    }

    /// Mints `amount` if the signer's wallet is empty. Returns `None` when it already holds tokens.
    pub async fn fund_if_empty(
        &self,
        signer: &Signer,
        amount: Amount,
    ) -> Result<Option<Settled<()>>, ChainError> {
        let balance = self.balance_of(signer.account()).await?;
        if !balance.is_zero() {
            debug!(account = %signer.account().short(), %balance, "Wallet already funded");
            return Ok(None);
        }

        let minted = self.mint(signer, amount).await?;
        info!(account = %signer.account().short(), %amount, "Faucet funded wallet");
        Ok(Some(minted))
    }
}
