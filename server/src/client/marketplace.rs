use serde::Serialize;
use tracing::{debug, info};

use crate::chain::amount::Amount;
use crate::chain::{ChainError, Sandbox, SandboxChain};
use crate::client::{ClientError, Settled, Submitter, TokenClient};
use crate::models::{
    AccountId, Event, EventDraft, MarketplaceSettings, PriceQuote, Ticket, TicketSnapshot,
    TicketStatus, TxReceipt,
};
use crate::wallet::Signer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRoute {
    Primary,
    Resale,
}

/// A completed purchase: the allowance granted and the sale itself.
#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    pub route: PurchaseRoute,
    pub ticket_id: u64,
    pub approved: Amount,
    pub approval: Option<TxReceipt>,
    pub receipt: TxReceipt,
}

/// Client for the ticket marketplace contract.
#[derive(Clone)]
pub struct MarketplaceClient {
    submitter: Submitter,
    token: TokenClient,
    approval_margin_percent: u32,
}

impl MarketplaceClient {
    pub fn new(submitter: Submitter, approval_margin_percent: u32) -> Self {
        Self {
            token: TokenClient::new(submitter.clone()),
            submitter,
            approval_margin_percent,
        }
    }

    fn chain(&self) -> &SandboxChain {
        self.submitter.chain()
    }

    /// Allowance to grant before paying `price`: the configured margin, or the
    /// full quoted total when fees push it higher.
    pub fn approval_for(&self, price: Amount, total: Amount) -> Amount {
        price.with_margin(self.approval_margin_percent).max(total)
    }

    pub async fn create_event(
        &self,
        signer: &Signer,
        draft: EventDraft,
    ) -> Result<Settled<u64>, ClientError> {
        draft.validate().map_err(ClientError::Invalid)?;

        let organizer = signer.account().clone();
        let settled = self
            .submitter
            .submit("create_event", signer, move |sandbox| {
                sandbox.create_event(&organizer, &draft)
            })
            .await?;
        info!(event_id = settled.result, "Event created");
        Ok(settled)
    }

    pub async fn buy_primary_ticket(
        &self,
        signer: &Signer,
        event_id: u64,
        ticket_id: u64,
    ) -> Result<Purchase, ClientError> {
        let (price, total) = self
            .chain()
            .run(move |sandbox| {
                let ticket = sandbox.ticket(ticket_id)?;
                match sandbox.ticket_status(ticket_id)? {
                    TicketStatus::Available => Ok((ticket.price, sandbox.quote(ticket_id)?.total)),
                    // Owned already: no approval, the contract reports why.
                    TicketStatus::Listed | TicketStatus::Held => Ok((Amount::ZERO, Amount::ZERO)),
                }
            })
            .await?;

        let buyer = signer.account().clone();
        let buy = move |sandbox: &mut Sandbox| sandbox.buy_ticket(&buyer, event_id, ticket_id);
        self.purchase_with_allowance(signer, PurchaseRoute::Primary, ticket_id, price, total, buy)
            .await
    }

    pub async fn buy_resale_ticket(
        &self,
        signer: &Signer,
        ticket_id: u64,
    ) -> Result<Purchase, ClientError> {
        let (listed, total) = self
            .chain()
            .run(move |sandbox| match sandbox.ticket_status(ticket_id)? {
                TicketStatus::Listed => {
                    let quote = sandbox.quote(ticket_id)?;
                    Ok((quote.price, quote.total))
                }
                TicketStatus::Available | TicketStatus::Held => Ok((Amount::ZERO, Amount::ZERO)),
            })
            .await?;

        let buyer = signer.account().clone();
        let buy = move |sandbox: &mut Sandbox| sandbox.buy_resale_ticket(&buyer, ticket_id);
        self.purchase_with_allowance(signer, PurchaseRoute::Resale, ticket_id, listed, total, buy)
            .await
    }

    async fn purchase_with_allowance<F>(
        &self,
        signer: &Signer,
        route: PurchaseRoute,
        ticket_id: u64,
        price: Amount,
        total: Amount,
        buy: F,
    ) -> Result<Purchase, ClientError>
    where
        F: FnOnce(&mut Sandbox) -> Result<(), ChainError> + Send + 'static,
    {
        let approved = self.approval_for(price, total);
        let approval = if approved.is_zero() {
            None
        } else {
            Some(self.token.approve(signer, approved).await?.receipt)
        };

        let operation = match route {
            PurchaseRoute::Primary => "buy_ticket",
            PurchaseRoute::Resale => "buy_resale_ticket",
        };
        let settled = self.submitter.submit(operation, signer, buy).await?;
        info!(ticket_id, ?route, buyer = %signer.account().short(), "Ticket purchased");

        Ok(Purchase {
            route,
            ticket_id,
            approved,
            approval,
            receipt: settled.receipt,
        })
    }

    /// Buys a ticket through whichever sale it is currently in.
    pub async fn purchase(&self, signer: &Signer, ticket_id: u64) -> Result<Purchase, ClientError> {
        let snapshot = self.ticket_snapshot(ticket_id).await?;
        debug!(ticket_id, status = ?snapshot.status, "Routing purchase");

        match snapshot.status {
            TicketStatus::Available => {
                self.buy_primary_ticket(signer, snapshot.ticket.event_id, ticket_id)
                    .await
            }
            TicketStatus::Listed => self.buy_resale_ticket(signer, ticket_id).await,
            TicketStatus::Held => Err(ClientError::NotForSale(ticket_id)),
        }
    }

    pub async fn list_ticket_for_sale(
        &self,
        signer: &Signer,
        ticket_id: u64,
        price: Amount,
    ) -> Result<Settled<()>, ClientError> {
        let seller = signer.account().clone();
        let settled = self
            .submitter
            .submit("list_ticket_for_sale", signer, move |sandbox| {
                sandbox.list_ticket_for_sale(&seller, ticket_id, price)
            })
            .await?;
        info!(ticket_id, %price, "Ticket listed for resale");
        Ok(settled)
    }

    pub async fn transfer_ticket(
        &self,
        signer: &Signer,
        ticket_id: u64,
        to: &AccountId,
    ) -> Result<Settled<()>, ClientError> {
        let from = signer.account().clone();
        let to = to.clone();
        Ok(self
            .submitter
            .submit("transfer_ticket", signer, move |sandbox| {
                sandbox.transfer_ticket(&from, ticket_id, &to)
            })
            .await?)
    }

    pub async fn verify_ticket(&self, ticket_id: u64) -> Result<bool, ChainError> {
        self.chain()
            .run(move |sandbox| sandbox.verify_ticket(ticket_id))
            .await
    }

    // Admin

    pub async fn pause_marketplace(&self, signer: &Signer) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        Ok(self
            .submitter
            .submit("pause_marketplace", signer, move |sandbox| {
                sandbox.pause_marketplace(&caller)
            })
            .await?)
    }

    pub async fn resume_marketplace(&self, signer: &Signer) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        Ok(self
            .submitter
            .submit("resume_marketplace", signer, move |sandbox| {
                sandbox.resume_marketplace(&caller)
            })
            .await?)
    }

    pub async fn set_royalty_percentage(
        &self,
        signer: &Signer,
        percent: u32,
    ) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        Ok(self
            .submitter
            .submit("set_royalty_percentage", signer, move |sandbox| {
                sandbox.set_royalty_percentage(&caller, percent)
            })
            .await?)
    }

    pub async fn set_platform_fee_percentage(
        &self,
        signer: &Signer,
        percent: u32,
    ) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        Ok(self
            .submitter
            .submit("set_platform_fee_percentage", signer, move |sandbox| {
                sandbox.set_platform_fee_percentage(&caller, percent)
            })
            .await?)
    }

    pub async fn set_treasury_wallet(
        &self,
        signer: &Signer,
        treasury: &AccountId,
    ) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        let treasury = treasury.clone();
        Ok(self
            .submitter
            .submit("set_treasury_wallet", signer, move |sandbox| {
                sandbox.set_treasury_wallet(&caller, &treasury)
            })
            .await?)
    }

    pub async fn set_ticket_price(
        &self,
        signer: &Signer,
        event_id: u64,
        ticket_id: u64,
        price: Amount,
    ) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        Ok(self
            .submitter
            .submit("set_ticket_price", signer, move |sandbox| {
                sandbox.set_ticket_price(&caller, event_id, ticket_id, price)
            })
            .await?)
    }

    pub async fn set_admin(
        &self,
        signer: &Signer,
        admin: &AccountId,
    ) -> Result<Settled<()>, ClientError> {
        let caller = signer.account().clone();
        let admin = admin.clone();
        Ok(self
            .submitter
            .submit("set_admin", signer, move |sandbox| {
                sandbox.set_admin(&caller, &admin)
            })
            .await?)
    }

    // Reads

    pub async fn settings(&self) -> Result<MarketplaceSettings, ChainError> {
        self.chain().run(|sandbox| sandbox.settings()).await
    }

    pub async fn event(&self, event_id: u64) -> Result<Event, ChainError> {
        self.chain().run(move |sandbox| sandbox.event(event_id)).await
    }

    pub async fn ticket(&self, ticket_id: u64) -> Result<Ticket, ChainError> {
        self.chain().run(move |sandbox| sandbox.ticket(ticket_id)).await
    }

    pub async fn owner_of(&self, ticket_id: u64) -> Result<AccountId, ChainError> {
        self.chain().run(move |sandbox| sandbox.owner_of(ticket_id)).await
    }

    pub async fn ticket_status(&self, ticket_id: u64) -> Result<TicketStatus, ChainError> {
        self.chain()
            .run(move |sandbox| sandbox.ticket_status(ticket_id))
            .await
    }

    pub async fn quote(&self, ticket_id: u64) -> Result<PriceQuote, ChainError> {
        self.chain().run(move |sandbox| sandbox.quote(ticket_id)).await
    }

    pub async fn ticket_snapshot(&self, ticket_id: u64) -> Result<TicketSnapshot, ChainError> {
        self.chain()
            .run(move |sandbox| sandbox.ticket_snapshot(ticket_id))
            .await
    }

    pub async fn next_ticket_id(&self) -> Result<u64, ChainError> {
        self.chain().run(|sandbox| sandbox.next_ticket_id()).await
    }

    pub async fn next_event_id(&self) -> Result<u64, ChainError> {
        self.chain().run(|sandbox| sandbox.next_event_id()).await
    }

    pub async fn organizer_events(&self, organizer: &AccountId) -> Result<Vec<u64>, ChainError> {
        let organizer = organizer.clone();
        self.chain()
            .run(move |sandbox| sandbox.organizer_events(&organizer))
            .await
    }
}
