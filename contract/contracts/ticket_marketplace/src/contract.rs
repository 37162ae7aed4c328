use crate::error::MarketplaceError;
use crate::events::{
    AdminChanged, EventCreated, FeesUpdated, InitializationEvent, PauseChanged, ResaleCompleted,
    TicketListed, TicketPurchased, TicketRepriced, TicketTransferred, TreasuryChanged,
};
use crate::fees::{self, MAX_PERCENT};
use crate::storage::{
    self, allocate_event_id, allocate_ticket_id, clear_resale_price, get_admin, get_event,
    get_organizer_events, get_payment_token, get_platform_fee, get_resale_price, get_royalty,
    get_ticket, get_ticket_owner, get_treasury, is_initialized, is_paused, set_admin,
    set_initialized, set_paused, set_payment_token, set_platform_fee, set_resale_price,
    set_royalty, set_ticket_owner, set_treasury, store_event, store_ticket,
};
use crate::types::{
    EventDetails, EventRecord, MarketplaceSettings, PriceQuote, TicketRecord, TicketStatus,
};
use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

#[contract]
pub struct TicketMarketplace;

#[contractimpl]
impl TicketMarketplace {
    /// Initializes the marketplace with its admin, fee treasury and payment token.
    pub fn initialize(
        env: Env,
        admin: Address,
        treasury: Address,
        payment_token: Address,
    ) -> Result<(), MarketplaceError> {
        if is_initialized(&env) {
            return Err(MarketplaceError::AlreadyInitialized);
        }

        validate_address(&env, &admin)?;
        validate_address(&env, &treasury)?;
        validate_address(&env, &payment_token)?;

        set_admin(&env, &admin);
        set_treasury(&env, &treasury);
        set_payment_token(&env, &payment_token);
        set_platform_fee(&env, storage::DEFAULT_PLATFORM_FEE_PERCENT);
        set_royalty(&env, storage::DEFAULT_ROYALTY_PERCENT);
        set_paused(&env, false);
        set_initialized(&env, true);

        InitializationEvent {
            admin,
            treasury,
            payment_token,
        }
        .publish(&env);

        Ok(())
    }

    /// Creates an event and its tickets. The caller becomes the organizer.
    pub fn create_event(
        env: Env,
        caller: Address,
        details: EventDetails,
        prices: Vec<i128>,
        seats: Vec<u32>,
        total_tickets: u32,
    ) -> Result<u64, MarketplaceError> {
        require_admin(&env, &caller)?;

        if total_tickets == 0 {
            return Err(MarketplaceError::InvalidTicketCount);
        }
        if prices.len() != total_tickets || seats.len() != total_tickets {
            return Err(MarketplaceError::TicketCountMismatch);
        }
        for price in prices.iter() {
            validate_price(price)?;
        }

        let event_id = allocate_event_id(&env);
        let first_ticket_id = storage::next_ticket_id(&env);

        for (price, seat_number) in prices.iter().zip(seats.iter()) {
            let ticket_id = allocate_ticket_id(&env);
            store_ticket(
                &env,
                &TicketRecord {
                    ticket_id,
                    event_id,
                    seat_number,
                    price,
                },
            );
        }

        store_event(
            &env,
            &EventRecord {
                event_id,
                name: details.name,
                date: details.date,
                time: details.time,
                location: details.location,
                description: details.description,
                total_tickets,
                tickets_sold: 0,
                organizer: caller.clone(),
            },
        );

        EventCreated {
            event_id,
            organizer: caller,
            first_ticket_id,
            total_tickets,
        }
        .publish(&env);

        Ok(event_id)
    }

    /// Buys a ticket that has never been sold, at its primary price plus the platform fee.
    pub fn buy_ticket(
        env: Env,
        buyer: Address,
        event_id: u64,
        ticket_id: u64,
    ) -> Result<(), MarketplaceError> {
        require_initialized(&env)?;
        buyer.require_auth();
        require_not_paused(&env)?;

        let mut event = get_event(&env, event_id).ok_or(MarketplaceError::EventNotFound)?;
        if event.tickets_sold >= event.total_tickets {
            return Err(MarketplaceError::SoldOut);
        }

        let ticket = get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
        if ticket.event_id != event_id {
            return Err(MarketplaceError::TicketEventMismatch);
        }
        if get_ticket_owner(&env, ticket_id).is_some() {
            return Err(MarketplaceError::TicketAlreadyOwned);
        }

        let quote = fees::primary_quote(ticket.price, get_platform_fee(&env))
            .ok_or(MarketplaceError::InvalidPrice)?;
        let payment = payment_client(&env)?;
        ensure_funds(&env, &payment, &buyer, quote.total)?;

        let marketplace = env.current_contract_address();
        let treasury = get_treasury(&env).ok_or(MarketplaceError::NotInitialized)?;
        pay(&payment, &marketplace, &buyer, &event.organizer, quote.price);
        pay(&payment, &marketplace, &buyer, &treasury, quote.platform_fee);

        set_ticket_owner(&env, ticket_id, &buyer);
        event.tickets_sold += 1;
        store_event(&env, &event);

        TicketPurchased {
            ticket_id,
            buyer,
            event_id,
            price: quote.price,
            platform_fee: quote.platform_fee,
        }
        .publish(&env);

        Ok(())
    }

    /// Buys a ticket listed for resale. The seller receives the listed price,
    /// the organizer the royalty and the treasury the platform fee.
    pub fn buy_resale_ticket(
        env: Env,
        buyer: Address,
        ticket_id: u64,
    ) -> Result<(), MarketplaceError> {
        require_initialized(&env)?;
        buyer.require_auth();
        require_not_paused(&env)?;

        let ticket = get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
        let listed_price = get_resale_price(&env, ticket_id);
        if listed_price <= 0 {
            return Err(MarketplaceError::NotListedForResale);
        }
        let seller = get_ticket_owner(&env, ticket_id).ok_or(MarketplaceError::TicketNotMinted)?;
        if seller == buyer {
            return Err(MarketplaceError::CannotBuyOwnTicket);
        }
        let event = get_event(&env, ticket.event_id).ok_or(MarketplaceError::EventNotFound)?;

        let quote = fees::resale_quote(listed_price, get_platform_fee(&env), get_royalty(&env))
            .ok_or(MarketplaceError::InvalidPrice)?;
        let payment = payment_client(&env)?;
        ensure_funds(&env, &payment, &buyer, quote.total)?;

        let marketplace = env.current_contract_address();
        let treasury = get_treasury(&env).ok_or(MarketplaceError::NotInitialized)?;
        pay(&payment, &marketplace, &buyer, &seller, quote.price);
        pay(&payment, &marketplace, &buyer, &event.organizer, quote.royalty);
        pay(&payment, &marketplace, &buyer, &treasury, quote.platform_fee);

        set_ticket_owner(&env, ticket_id, &buyer);
        clear_resale_price(&env, ticket_id);

        ResaleCompleted {
            ticket_id,
            buyer,
            seller,
            price: quote.price,
            royalty: quote.royalty,
            platform_fee: quote.platform_fee,
        }
        .publish(&env);

        Ok(())
    }

    /// Puts an owned ticket up for resale at `price`.
    pub fn list_ticket_for_sale(
        env: Env,
        seller: Address,
        ticket_id: u64,
        price: i128,
    ) -> Result<(), MarketplaceError> {
        require_initialized(&env)?;
        seller.require_auth();
        require_not_paused(&env)?;

        if price == 0 {
            return Err(MarketplaceError::InvalidPrice);
        }
        validate_price(price)?;
        require_ticket_owner(&env, ticket_id, &seller)?;

        set_resale_price(&env, ticket_id, price);

        TicketListed {
            ticket_id,
            seller,
            price,
        }
        .publish(&env);

        Ok(())
    }

    /// Hands a ticket to another address without payment. Any resale listing is dropped.
    pub fn transfer_ticket(
        env: Env,
        from: Address,
        ticket_id: u64,
        to: Address,
    ) -> Result<(), MarketplaceError> {
        require_initialized(&env)?;
        from.require_auth();
        require_not_paused(&env)?;

        require_ticket_owner(&env, ticket_id, &from)?;
        if to == from {
            return Err(MarketplaceError::InvalidAddress);
        }
        validate_address(&env, &to)?;

        set_ticket_owner(&env, ticket_id, &to);
        clear_resale_price(&env, ticket_id);

        TicketTransferred { ticket_id, from, to }.publish(&env);

        Ok(())
    }

    /// Confirms a ticket was minted and has an owner. Fails for unknown or unsold tickets.
    pub fn verify_ticket(env: Env, ticket_id: u64) -> Result<bool, MarketplaceError> {
        Self::owner_of(env, ticket_id).map(|_| true)
    }

    pub fn pause_marketplace(env: Env, caller: Address) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        if is_paused(&env) {
            return Err(MarketplaceError::AlreadyPaused);
        }
        set_paused(&env, true);
        PauseChanged { paused: true }.publish(&env);
        Ok(())
    }

    pub fn resume_marketplace(env: Env, caller: Address) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        if !is_paused(&env) {
            return Err(MarketplaceError::NotPaused);
        }
        set_paused(&env, false);
        PauseChanged { paused: false }.publish(&env);
        Ok(())
    }

    pub fn set_royalty_percentage(
        env: Env,
        caller: Address,
        percent: u32,
    ) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        validate_percent(percent)?;
        set_royalty(&env, percent);
        FeesUpdated {
            platform_fee_percent: get_platform_fee(&env),
            royalty_percent: percent,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_platform_fee_percentage(
        env: Env,
        caller: Address,
        percent: u32,
    ) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        validate_percent(percent)?;
        set_platform_fee(&env, percent);
        FeesUpdated {
            platform_fee_percent: percent,
            royalty_percent: get_royalty(&env),
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_treasury_wallet(
        env: Env,
        caller: Address,
        treasury: Address,
    ) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        validate_address(&env, &treasury)?;
        set_treasury(&env, &treasury);
        TreasuryChanged { treasury }.publish(&env);
        Ok(())
    }

    /// Changes the primary price of a ticket.
    pub fn set_ticket_price(
        env: Env,
        caller: Address,
        event_id: u64,
        ticket_id: u64,
        price: i128,
    ) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        validate_price(price)?;
        get_event(&env, event_id).ok_or(MarketplaceError::EventNotFound)?;
        let mut ticket = get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
        if ticket.event_id != event_id {
            return Err(MarketplaceError::TicketEventMismatch);
        }

        ticket.price = price;
        store_ticket(&env, &ticket);

        TicketRepriced {
            ticket_id,
            event_id,
            price,
        }
        .publish(&env);
        Ok(())
    }

    /// Hands the admin role to another address.
    pub fn set_admin(env: Env, caller: Address, admin: Address) -> Result<(), MarketplaceError> {
        require_admin(&env, &caller)?;
        validate_address(&env, &admin)?;
        set_admin(&env, &admin);
        AdminChanged {
            previous: caller,
            admin,
        }
        .publish(&env);
        Ok(())
    }

    /// Returns the current administrator address.
    pub fn owner(env: Env) -> Result<Address, MarketplaceError> {
        get_admin(&env).ok_or(MarketplaceError::NotInitialized)
    }

    pub fn treasury_wallet(env: Env) -> Result<Address, MarketplaceError> {
        get_treasury(&env).ok_or(MarketplaceError::NotInitialized)
    }

    pub fn payment_token(env: Env) -> Result<Address, MarketplaceError> {
        get_payment_token(&env).ok_or(MarketplaceError::NotInitialized)
    }

    pub fn platform_fee_percent(env: Env) -> u32 {
        get_platform_fee(&env)
    }

    pub fn royalty_percent(env: Env) -> u32 {
        get_royalty(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn next_event_id(env: Env) -> u64 {
        storage::next_event_id(&env)
    }

    pub fn next_ticket_id(env: Env) -> u64 {
        storage::next_ticket_id(&env)
    }

    pub fn event(env: Env, event_id: u64) -> Result<EventRecord, MarketplaceError> {
        get_event(&env, event_id).ok_or(MarketplaceError::EventNotFound)
    }

    pub fn ticket(env: Env, ticket_id: u64) -> Result<TicketRecord, MarketplaceError> {
        get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)
    }

    /// Owner of a ticket. Fails rather than returning a default for unsold tickets.
    pub fn owner_of(env: Env, ticket_id: u64) -> Result<Address, MarketplaceError> {
        get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
        get_ticket_owner(&env, ticket_id).ok_or(MarketplaceError::TicketNotMinted)
    }

    /// Resale price of a ticket, zero when it is not listed.
    pub fn secondary_sale_price(env: Env, ticket_id: u64) -> i128 {
        get_resale_price(&env, ticket_id)
    }

    pub fn ticket_status(env: Env, ticket_id: u64) -> Result<TicketStatus, MarketplaceError> {
        get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
        Ok(status_of(&env, ticket_id))
    }

    /// What a buyer would pay for a ticket right now, fees included.
    pub fn quote(env: Env, ticket_id: u64) -> Result<PriceQuote, MarketplaceError> {
        let ticket = get_ticket(&env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
        let quote = match status_of(&env, ticket_id) {
            TicketStatus::Available => fees::primary_quote(ticket.price, get_platform_fee(&env)),
            TicketStatus::Listed => fees::resale_quote(
                get_resale_price(&env, ticket_id),
                get_platform_fee(&env),
                get_royalty(&env),
            ),
            TicketStatus::Held => return Err(MarketplaceError::NotListedForResale),
        };
        quote.ok_or(MarketplaceError::InvalidPrice)
    }

    /// Retrieves all event ids organized by an address.
    pub fn organizer_events(env: Env, organizer: Address) -> Vec<u64> {
        get_organizer_events(&env, &organizer)
    }

    pub fn settings(env: Env) -> Result<MarketplaceSettings, MarketplaceError> {
        require_initialized(&env)?;
        Ok(MarketplaceSettings {
            admin: get_admin(&env).ok_or(MarketplaceError::NotInitialized)?,
            treasury: get_treasury(&env).ok_or(MarketplaceError::NotInitialized)?,
            payment_token: get_payment_token(&env).ok_or(MarketplaceError::NotInitialized)?,
            platform_fee_percent: get_platform_fee(&env),
            royalty_percent: get_royalty(&env),
            paused: is_paused(&env),
            next_event_id: storage::next_event_id(&env),
            next_ticket_id: storage::next_ticket_id(&env),
        })
    }
}

fn require_initialized(env: &Env) -> Result<(), MarketplaceError> {
    if !is_initialized(env) {
        return Err(MarketplaceError::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), MarketplaceError> {
    caller.require_auth();
    let admin = get_admin(env).ok_or(MarketplaceError::NotInitialized)?;
    if &admin != caller {
        return Err(MarketplaceError::NotAdmin);
    }
    Ok(())
}

fn require_not_paused(env: &Env) -> Result<(), MarketplaceError> {
    if is_paused(env) {
        return Err(MarketplaceError::MarketplacePaused);
    }
    Ok(())
}

fn require_ticket_owner(env: &Env, ticket_id: u64, caller: &Address) -> Result<(), MarketplaceError> {
    get_ticket(env, ticket_id).ok_or(MarketplaceError::TicketNotFound)?;
    let owner = get_ticket_owner(env, ticket_id).ok_or(MarketplaceError::TicketNotMinted)?;
    if &owner != caller {
        return Err(MarketplaceError::NotTicketOwner);
    }
    Ok(())
}

fn status_of(env: &Env, ticket_id: u64) -> TicketStatus {
    match get_ticket_owner(env, ticket_id) {
        None => TicketStatus::Available,
        Some(_) if get_resale_price(env, ticket_id) > 0 => TicketStatus::Listed,
        Some(_) => TicketStatus::Held,
    }
}

fn validate_percent(percent: u32) -> Result<(), MarketplaceError> {
    if percent > MAX_PERCENT {
        return Err(MarketplaceError::InvalidPercentage);
    }
    Ok(())
}

/// Rejects negative prices and prices whose fees could overflow at any fee setting.
fn validate_price(price: i128) -> Result<(), MarketplaceError> {
    if price < 0 || !fees::is_quotable(price) {
        return Err(MarketplaceError::InvalidPrice);
    }
    Ok(())
}

fn validate_address(env: &Env, address: &Address) -> Result<(), MarketplaceError> {
    if address == &env.current_contract_address() {
        return Err(MarketplaceError::InvalidAddress);
    }
    Ok(())
}

fn payment_client(env: &Env) -> Result<token::Client<'_>, MarketplaceError> {
    let token_address = get_payment_token(env).ok_or(MarketplaceError::NotInitialized)?;
    Ok(token::Client::new(env, &token_address))
}

fn ensure_funds(
    env: &Env,
    payment: &token::Client,
    buyer: &Address,
    total: i128,
) -> Result<(), MarketplaceError> {
    if payment.allowance(buyer, &env.current_contract_address()) < total {
        return Err(MarketplaceError::InsufficientAllowance);
    }
    if payment.balance(buyer) < total {
        return Err(MarketplaceError::InsufficientBalance);
    }
    Ok(())
}

fn pay(payment: &token::Client, marketplace: &Address, from: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        payment.transfer_from(marketplace, from, to, &amount);
    }
}
