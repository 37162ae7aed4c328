//! In-process ledger running the marketplace contract and its payment token.
//!
//! The Soroban host is single-threaded, so the [`Sandbox`] lives on a dedicated
//! thread and is driven through [`SandboxChain`], a cloneable handle that sends
//! jobs over a channel. Jobs run one at a time in submission order.

use std::collections::HashMap;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use soroban_sdk::testutils::{Address as _, EnvTestConfig};
use soroban_sdk::{token, Address, Env, InvokeError};
use ticket_marketplace::{EventDetails, TicketMarketplace, TicketMarketplaceClient};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::chain::amount::Amount;
use crate::chain::ChainError;
use crate::models::{
    AccountId, Event, EventDraft, MarketplaceSettings, PriceQuote, Ticket, TicketSnapshot,
    TicketStatus,
};

const JOB_QUEUE_DEPTH: usize = 64;
/// Ledgers an allowance stays valid for.
const APPROVAL_LEDGER_WINDOW: u32 = 1_000;

type Job = Box<dyn FnOnce(&mut Sandbox) + Send>;

/// Handle to the sandbox ledger thread.
#[derive(Clone)]
pub struct SandboxChain {
    jobs: mpsc::Sender<Job>,
}

impl SandboxChain {
    /// Starts the ledger thread and deploys the token and marketplace on it.
    pub async fn spawn() -> Result<Self, ChainError> {
        let (jobs, mut queue) = mpsc::channel::<Job>(JOB_QUEUE_DEPTH);
        let (ready_tx, ready_rx) = oneshot::channel();

        thread::Builder::new()
            .name("marketplace-sandbox".to_string())
            .spawn(move || {
                let mut sandbox = match Sandbox::deploy() {
                    Ok(sandbox) => {
                        let _ = ready_tx.send(Ok(()));
                        sandbox
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                while let Some(job) = queue.blocking_recv() {
                    if panic::catch_unwind(AssertUnwindSafe(|| job(&mut sandbox))).is_err() {
                        error!("Sandbox job panicked; ledger state is kept as of the failed call");
                    }
                }
                info!("Sandbox ledger stopped");
            })
            .map_err(|e| ChainError::Host(e.to_string()))?;

        ready_rx.await.map_err(|_| ChainError::Unavailable)??;
        Ok(Self { jobs })
    }

    /// Runs `job` against the ledger and waits for its result.
    pub async fn run<T, F>(&self, job: F) -> Result<T, ChainError>
    where
        F: FnOnce(&mut Sandbox) -> Result<T, ChainError> + Send + 'static,
        T: Send + 'static,
    {
        let (reply, result) = oneshot::channel();
        let job: Job = Box::new(move |sandbox| {
            let _ = reply.send(job(sandbox));
        });

        self.jobs
            .send(job)
            .await
            .map_err(|_| ChainError::Unavailable)?;

        match result.await {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::Host("ledger job aborted".to_string())),
        }
    }
}

/// The ledger itself: a Soroban host with the payment token and marketplace deployed.
pub struct Sandbox {
    env: Env,
    marketplace: Address,
    token: Address,
    token_issuer: Address,
    accounts: HashMap<AccountId, Address>,
    known: Vec<AccountId>,
}

impl Sandbox {
    /// Deploys the payment token and the marketplace, with a fresh admin and treasury.
    pub fn deploy() -> Result<Self, ChainError> {
        let env = Env::new_with_config(EnvTestConfig {
            capture_snapshot_at_drop: false,
        });
        env.mock_all_auths();
        env.cost_estimate().budget().reset_unlimited();

        let token_issuer = Address::generate(&env);
        let token = env
            .register_stellar_asset_contract_v2(token_issuer.clone())
            .address();
        let marketplace = env.register(TicketMarketplace, ());

        let mut sandbox = Self {
            env,
            marketplace,
            token,
            token_issuer,
            accounts: HashMap::new(),
            known: Vec::new(),
        };

        let admin = sandbox.create_account();
        let treasury = sandbox.create_account();
        let admin = sandbox.address(&admin)?;
        let treasury = sandbox.address(&treasury)?;
        settle(
            sandbox
                .marketplace()
                .try_initialize(&admin, &treasury, &sandbox.token),
        )?;

        info!(
            marketplace = %account_id(&sandbox.marketplace),
            token = %account_id(&sandbox.token),
            admin = %account_id(&admin),
            "Sandbox ledger deployed"
        );
        Ok(sandbox)
    }

    fn marketplace(&self) -> TicketMarketplaceClient<'_> {
        TicketMarketplaceClient::new(&self.env, &self.marketplace)
    }

    fn payment_token(&self) -> token::Client<'_> {
        token::Client::new(&self.env, &self.token)
    }

    fn address(&self, account: &AccountId) -> Result<Address, ChainError> {
        self.accounts
            .get(account)
            .cloned()
            .ok_or_else(|| ChainError::UnknownAccount(account.to_string()))
    }

    /// Generates a fresh address on the ledger and registers it as a wallet account.
    ///
    /// The test host hands out contract-style `C...` strkeys; they hold tokens and
    /// authorize calls like any other address under mocked auths.
    pub fn create_account(&mut self) -> AccountId {
        let address = Address::generate(&self.env);
        let id = account_id(&address);
        self.accounts.insert(id.clone(), address);
        self.known.push(id.clone());
        id
    }

    pub fn has_account(&self, account: &AccountId) -> bool {
        self.accounts.contains_key(account)
    }

    /// Accounts created on this ledger, oldest first.
    pub fn accounts(&self) -> Vec<AccountId> {
        self.known.clone()
    }

    pub fn marketplace_id(&self) -> AccountId {
        account_id(&self.marketplace)
    }

    // Payment token

    pub fn balance(&self, account: &AccountId) -> Result<Amount, ChainError> {
        let address = self.address(account)?;
        settle(self.payment_token().try_balance(&address)).map(Amount::from_units)
    }

    /// Allowance `owner` has granted the marketplace.
    pub fn allowance(&self, owner: &AccountId) -> Result<Amount, ChainError> {
        let owner = self.address(owner)?;
        settle(self.payment_token().try_allowance(&owner, &self.marketplace))
            .map(Amount::from_units)
    }

    /// Lets the marketplace spend up to `amount` of the owner's tokens.
    pub fn approve(&self, owner: &AccountId, amount: Amount) -> Result<(), ChainError> {
        let owner = self.address(owner)?;
        let expiration = self.env.ledger().sequence() + APPROVAL_LEDGER_WINDOW;
        settle(self.payment_token().try_approve(
            &owner,
            &self.marketplace,
            &amount.units(),
            &expiration,
        ))
    }

    pub fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), ChainError> {
        let from = self.address(from)?;
        let to = self.address(to)?;
        settle(self.payment_token().try_transfer(&from, &to, &amount.units()))
    }

    /// Issues new tokens. Only the sandbox token issuer can do this.
    pub fn mint(&self, to: &AccountId, amount: Amount) -> Result<(), ChainError> {
        let to = self.address(to)?;
        let issuer = token::StellarAssetClient::new(&self.env, &self.token);
        debug!(issuer = %account_id(&self.token_issuer), "Minting payment tokens");
        settle(issuer.try_mint(&to, &amount.units()))
    }

    // Marketplace reads

    pub fn settings(&self) -> Result<MarketplaceSettings, ChainError> {
        let settings = settle(self.marketplace().try_settings())?;
        Ok(MarketplaceSettings {
            marketplace: self.marketplace_id(),
            admin: account_id(&settings.admin),
            treasury: account_id(&settings.treasury),
            payment_token: account_id(&settings.payment_token),
            platform_fee_percent: settings.platform_fee_percent,
            royalty_percent: settings.royalty_percent,
            paused: settings.paused,
            next_event_id: settings.next_event_id,
            next_ticket_id: settings.next_ticket_id,
        })
    }

    pub fn next_event_id(&self) -> Result<u64, ChainError> {
        settle(self.marketplace().try_next_event_id())
    }

    pub fn next_ticket_id(&self) -> Result<u64, ChainError> {
        settle(self.marketplace().try_next_ticket_id())
    }

    pub fn event(&self, event_id: u64) -> Result<Event, ChainError> {
        let event = settle(self.marketplace().try_event(&event_id))?;
        Ok(Event {
            event_id: event.event_id,
            name: std_string(&event.name),
            date: std_string(&event.date),
            time: std_string(&event.time),
            location: std_string(&event.location),
            description: std_string(&event.description),
            total_tickets: event.total_tickets,
            tickets_sold: event.tickets_sold,
            organizer: account_id(&event.organizer),
        })
    }

    pub fn ticket(&self, ticket_id: u64) -> Result<Ticket, ChainError> {
        let ticket = settle(self.marketplace().try_ticket(&ticket_id))?;
        Ok(Ticket {
            ticket_id: ticket.ticket_id,
            event_id: ticket.event_id,
            seat_number: ticket.seat_number,
            price: Amount::from_units(ticket.price),
        })
    }

    pub fn owner_of(&self, ticket_id: u64) -> Result<AccountId, ChainError> {
        settle(self.marketplace().try_owner_of(&ticket_id)).map(|owner| account_id(&owner))
    }

    pub fn secondary_sale_price(&self, ticket_id: u64) -> Result<Amount, ChainError> {
        settle(self.marketplace().try_secondary_sale_price(&ticket_id)).map(Amount::from_units)
    }

    pub fn ticket_status(&self, ticket_id: u64) -> Result<TicketStatus, ChainError> {
        settle(self.marketplace().try_ticket_status(&ticket_id)).map(TicketStatus::from)
    }

    pub fn quote(&self, ticket_id: u64) -> Result<PriceQuote, ChainError> {
        settle(self.marketplace().try_quote(&ticket_id)).map(PriceQuote::from)
    }

    pub fn verify_ticket(&self, ticket_id: u64) -> Result<bool, ChainError> {
        settle(self.marketplace().try_verify_ticket(&ticket_id))
    }

    pub fn organizer_events(&self, organizer: &AccountId) -> Result<Vec<u64>, ChainError> {
        let organizer = self.address(organizer)?;
        let ids = settle(self.marketplace().try_organizer_events(&organizer))?;
        Ok(ids.iter().collect())
    }

    /// Ticket, status, owner and listing in one read.
    pub fn ticket_snapshot(&self, ticket_id: u64) -> Result<TicketSnapshot, ChainError> {
        let ticket = self.ticket(ticket_id)?;
        let status = self.ticket_status(ticket_id)?;
        let owner = match status {
            TicketStatus::Available => None,
            TicketStatus::Listed | TicketStatus::Held => Some(self.owner_of(ticket_id)?),
        };
        let resale_price = self.secondary_sale_price(ticket_id)?;
        Ok(TicketSnapshot {
            ticket,
            status,
            owner,
            resale_price,
        })
    }

    // Marketplace transactions

    pub fn create_event(&self, caller: &AccountId, draft: &EventDraft) -> Result<u64, ChainError> {
        let caller = self.address(caller)?;
        let details = EventDetails {
            name: soroban_string(&self.env, &draft.name),
            date: soroban_string(&self.env, &draft.date),
            time: soroban_string(&self.env, &draft.time),
            location: soroban_string(&self.env, &draft.location),
            description: soroban_string(&self.env, &draft.description),
        };
        let mut prices = soroban_sdk::Vec::new(&self.env);
        for price in &draft.prices {
            prices.push_back(price.units());
        }
        let mut seats = soroban_sdk::Vec::new(&self.env);
        for seat in &draft.seats {
            seats.push_back(*seat);
        }
        settle(self.marketplace().try_create_event(
            &caller,
            &details,
            &prices,
            &seats,
            &draft.total_tickets,
        ))
    }

    pub fn buy_ticket(&self, buyer: &AccountId, event_id: u64, ticket_id: u64) -> Result<(), ChainError> {
        let buyer = self.address(buyer)?;
        settle(self.marketplace().try_buy_ticket(&buyer, &event_id, &ticket_id))
    }

    pub fn buy_resale_ticket(&self, buyer: &AccountId, ticket_id: u64) -> Result<(), ChainError> {
        let buyer = self.address(buyer)?;
        settle(self.marketplace().try_buy_resale_ticket(&buyer, &ticket_id))
    }

    pub fn list_ticket_for_sale(
        &self,
        seller: &AccountId,
        ticket_id: u64,
        price: Amount,
    ) -> Result<(), ChainError> {
        let seller = self.address(seller)?;
        settle(
            self.marketplace()
                .try_list_ticket_for_sale(&seller, &ticket_id, &price.units()),
        )
    }

    pub fn transfer_ticket(
        &self,
        from: &AccountId,
        ticket_id: u64,
        to: &AccountId,
    ) -> Result<(), ChainError> {
        let from = self.address(from)?;
        let to = self.address(to)?;
        settle(self.marketplace().try_transfer_ticket(&from, &ticket_id, &to))
    }

    pub fn pause_marketplace(&self, caller: &AccountId) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        settle(self.marketplace().try_pause_marketplace(&caller))
    }

    pub fn resume_marketplace(&self, caller: &AccountId) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        settle(self.marketplace().try_resume_marketplace(&caller))
    }

    pub fn set_royalty_percentage(&self, caller: &AccountId, percent: u32) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        settle(self.marketplace().try_set_royalty_percentage(&caller, &percent))
    }

    pub fn set_platform_fee_percentage(
        &self,
        caller: &AccountId,
        percent: u32,
    ) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        settle(
            self.marketplace()
                .try_set_platform_fee_percentage(&caller, &percent),
        )
    }

    pub fn set_treasury_wallet(&self, caller: &AccountId, treasury: &AccountId) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        let treasury = self.address(treasury)?;
        settle(self.marketplace().try_set_treasury_wallet(&caller, &treasury))
    }

    pub fn set_ticket_price(
        &self,
        caller: &AccountId,
        event_id: u64,
        ticket_id: u64,
        price: Amount,
    ) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        settle(self.marketplace().try_set_ticket_price(
            &caller,
            &event_id,
            &ticket_id,
            &price.units(),
        ))
    }

    pub fn set_admin(&self, caller: &AccountId, admin: &AccountId) -> Result<(), ChainError> {
        let caller = self.address(caller)?;
        let admin = self.address(admin)?;
        settle(self.marketplace().try_set_admin(&caller, &admin))
    }
}

/// Flattens the result of a `try_*` contract call.
fn settle<T, C: Debug, E: Into<ChainError>>(
    result: Result<Result<T, C>, Result<E, InvokeError>>,
) -> Result<T, ChainError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ChainError::Decode(format!("{:?}", e))),
        Err(Ok(error)) => Err(error.into()),
        Err(Err(e)) => Err(ChainError::Host(format!("{:?}", e))),
    }
}

fn account_id(address: &Address) -> AccountId {
    AccountId::new(std_string(&address.to_string()))
}

fn std_string(value: &soroban_sdk::String) -> String {
    let mut buf = vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn soroban_string(env: &Env, value: &str) -> soroban_sdk::String {
    soroban_sdk::String::from_str(env, value)
}
