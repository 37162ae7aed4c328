use super::contract::{TicketMarketplace, TicketMarketplaceClient};
use super::error::MarketplaceError;
use super::types::{EventDetails, TicketStatus};
use soroban_sdk::{testutils::Address as _, token, vec, Address, Env, String, Vec};

const TCOIN: i128 = 10_000_000;
const APPROVAL_WINDOW: u32 = 1_000;

struct Marketplace {
    env: Env,
    client: TicketMarketplaceClient<'static>,
    token: Address,
    admin: Address,
    treasury: Address,
}

impl Marketplace {
    fn balance(&self, account: &Address) -> i128 {
        token::Client::new(&self.env, &self.token).balance(account)
    }

    fn fund(&self, account: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.token).mint(account, &amount);
    }

    fn approve(&self, account: &Address, amount: i128) {
        let expiration = self.env.ledger().sequence() + APPROVAL_WINDOW;
        token::Client::new(&self.env, &self.token).approve(
            account,
            &self.client.address,
            &amount,
            &expiration,
        );
    }

    fn buyer(&self) -> Address {
        let buyer = Address::generate(&self.env);
        self.fund(&buyer, 10 * TCOIN);
        buyer
    }

    fn create_event(&self, prices: Vec<i128>, seats: Vec<u32>, total: u32) -> u64 {
        self.client
            .create_event(&self.admin, &details(&self.env), &prices, &seats, &total)
    }
}

fn details(env: &Env) -> EventDetails {
    EventDetails {
        name: String::from_str(env, "Blackpink concert"),
        date: String::from_str(env, "2023-12-25"),
        time: String::from_str(env, "18:00"),
        location: String::from_str(env, "Toronto, ON"),
        description: String::from_str(env, "A great concert!"),
    }
}

/// Deploys the token and marketplace and creates the default three-ticket event.
fn setup_test() -> Marketplace {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(TicketMarketplace, ());
    let client = TicketMarketplaceClient::new(&env, &contract_id);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let admin = Address::generate(&env);
    let treasury = Address::generate(&env);

    client.initialize(&admin, &treasury, &token);

    let marketplace = Marketplace {
        env,
        client,
        token,
        admin,
        treasury,
    };
    marketplace.create_event(
        vec![&marketplace.env, TCOIN, 2 * TCOIN, 3 * TCOIN],
        vec![&marketplace.env, 101, 119, 130],
        3,
    );
    marketplace
}

#[test]
fn test_initialize_records_settings() {
    let m = setup_test();

    assert_eq!(m.client.owner(), m.admin);
    assert_eq!(m.client.treasury_wallet(), m.treasury);
    assert_eq!(m.client.payment_token(), m.token);
    assert_eq!(m.client.platform_fee_percent(), 5);
    assert_eq!(m.client.royalty_percent(), 10);
    assert!(!m.client.is_paused());

    let again = m.client.try_initialize(&m.admin, &m.treasury, &m.token);
    assert_eq!(again, Err(Ok(MarketplaceError::AlreadyInitialized)));
}

#[test]
fn test_create_event() {
    let m = setup_test();

    let event = m.client.event(&1);
    assert_eq!(event.name, String::from_str(&m.env, "Blackpink concert"));
    assert_eq!(event.date, String::from_str(&m.env, "2023-12-25"));
    assert_eq!(event.location, String::from_str(&m.env, "Toronto, ON"));
    assert_eq!(event.total_tickets, 3);
    assert_eq!(event.tickets_sold, 0);
    assert_eq!(event.organizer, m.admin);

    assert_eq!(m.client.next_event_id(), 2);
    assert_eq!(m.client.next_ticket_id(), 4);

    let ticket = m.client.ticket(&2);
    assert_eq!(ticket.event_id, 1);
    assert_eq!(ticket.seat_number, 119);
    assert_eq!(ticket.price, 2 * TCOIN);
    assert_eq!(m.client.ticket_status(&2), TicketStatus::Available);

    assert_eq!(m.client.organizer_events(&m.admin), vec![&m.env, 1u64]);
}

#[test]
fn test_ticket_ids_are_global_across_events() {
    let m = setup_test();

    let event_id = m.create_event(
        vec![&m.env, 2 * TCOIN, 2 * TCOIN],
        vec![&m.env, 1, 2],
        2,
    );
    assert_eq!(event_id, 2);
    assert_eq!(m.client.ticket(&4).event_id, 2);
    assert_eq!(m.client.ticket(&5).event_id, 2);
    assert_eq!(m.client.next_ticket_id(), 6);
    assert_eq!(m.client.organizer_events(&m.admin), vec![&m.env, 1u64, 2u64]);
}

#[test]
fn test_create_event_rejects_mismatched_counts() {
    let m = setup_test();
    let prices = vec![&m.env, TCOIN, TCOIN];
    let seats = vec![&m.env, 1, 2, 3];

    let result = m
        .client
        .try_create_event(&m.admin, &details(&m.env), &prices, &seats, &3);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketCountMismatch)));

    let result = m
        .client
        .try_create_event(&m.admin, &details(&m.env), &prices, &seats, &2);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketCountMismatch)));

    // no event or ticket was created by the failed calls
    assert_eq!(m.client.next_event_id(), 2);
    assert_eq!(m.client.next_ticket_id(), 4);
}

#[test]
fn test_create_event_rejects_zero_tickets() {
    let m = setup_test();
    let result = m.client.try_create_event(
        &m.admin,
        &details(&m.env),
        &Vec::new(&m.env),
        &Vec::new(&m.env),
        &0,
    );
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidTicketCount)));
}

#[test]
fn test_create_event_rejects_negative_price() {
    let m = setup_test();
    let result = m.client.try_create_event(
        &m.admin,
        &details(&m.env),
        &vec![&m.env, -1i128],
        &vec![&m.env, 1u32],
        &1,
    );
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));
}

#[test]
fn test_create_event_rejects_price_too_large_to_quote() {
    let m = setup_test();
    let result = m.client.try_create_event(
        &m.admin,
        &details(&m.env),
        &vec![&m.env, TCOIN, i128::MAX / 2],
        &vec![&m.env, 1u32, 2u32],
        &2,
    );
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));
    assert_eq!(m.client.next_event_id(), 2);
    assert_eq!(m.client.next_ticket_id(), 4);
}

#[test]
fn test_buy_primary_ticket_pays_price_and_platform_fee() {
    let m = setup_test();
    let buyer = m.buyer();
    let organizer_before = m.balance(&m.admin);

    // 1 TCOIN plus the 5% platform fee
    m.approve(&buyer, TCOIN * 105 / 100);
    m.client.buy_ticket(&buyer, &1, &1);

    assert_eq!(m.balance(&buyer), 8 * TCOIN + 9_500_000); // 10 - 1.05
    assert_eq!(m.balance(&m.treasury), 500_000); // 0.05
    assert_eq!(m.balance(&m.admin) - organizer_before, TCOIN);

    assert!(m.client.verify_ticket(&1));
    assert_eq!(m.client.owner_of(&1), buyer);
    assert_eq!(m.client.event(&1).tickets_sold, 1);
    assert_eq!(m.client.ticket_status(&1), TicketStatus::Held);
}

#[test]
fn test_primary_ticket_can_only_be_bought_once() {
    let m = setup_test();
    let first = m.buyer();
    let second = m.buyer();
    m.approve(&first, 10 * TCOIN);
    m.approve(&second, 10 * TCOIN);

    m.client.buy_ticket(&first, &1, &3);

    let repeat = m.client.try_buy_ticket(&second, &1, &3);
    assert_eq!(repeat, Err(Ok(MarketplaceError::TicketAlreadyOwned)));
    let own_repeat = m.client.try_buy_ticket(&first, &1, &3);
    assert_eq!(own_repeat, Err(Ok(MarketplaceError::TicketAlreadyOwned)));

    assert_eq!(m.client.owner_of(&3), first);
    assert_eq!(m.client.event(&1).tickets_sold, 1);
}

#[test]
fn test_buy_ticket_failures() {
    let m = setup_test();
    let buyer = m.buyer();

    // no allowance granted yet
    let result = m.client.try_buy_ticket(&buyer, &1, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::InsufficientAllowance)));

    // allowance covers the price but not the platform fee
    m.approve(&buyer, TCOIN);
    let result = m.client.try_buy_ticket(&buyer, &1, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::InsufficientAllowance)));

    m.approve(&buyer, 100 * TCOIN);
    // an unknown event is reported as such, not as sold out
    let result = m.client.try_buy_ticket(&buyer, &999, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::EventNotFound)));

    let result = m.client.try_buy_ticket(&buyer, &1, &4);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketNotFound)));

    let poor = Address::generate(&m.env);
    m.approve(&poor, 100 * TCOIN);
    let result = m.client.try_buy_ticket(&poor, &1, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::InsufficientBalance)));

    assert_eq!(m.balance(&buyer), 10 * TCOIN);
    assert_eq!(m.client.event(&1).tickets_sold, 0);
}

#[test]
fn test_buy_ticket_checks_event_membership() {
    let m = setup_test();
    m.create_event(vec![&m.env, TCOIN], vec![&m.env, 7], 1);
    let buyer = m.buyer();
    m.approve(&buyer, 10 * TCOIN);

    let result = m.client.try_buy_ticket(&buyer, &2, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketEventMismatch)));

    m.client.buy_ticket(&buyer, &2, &4);
    let result = m.client.try_buy_ticket(&buyer, &2, &4);
    assert_eq!(result, Err(Ok(MarketplaceError::SoldOut)));
}

#[test]
fn test_resale_pays_seller_royalty_and_fee() {
    let m = setup_test();
    let event_id = m.create_event(
        vec![&m.env, 2 * TCOIN, 2 * TCOIN, 2 * TCOIN],
        vec![&m.env, 101, 119, 130],
        3,
    );
    let seller = m.buyer();
    let buyer = m.buyer();

    m.approve(&seller, 10 * TCOIN);
    m.client.buy_ticket(&seller, &event_id, &6);
    m.client.list_ticket_for_sale(&seller, &6, &(6 * TCOIN));
    assert_eq!(m.client.secondary_sale_price(&6), 6 * TCOIN);
    assert_eq!(m.client.ticket_status(&6), TicketStatus::Listed);

    let quote = m.client.quote(&6);
    assert_eq!(quote.total, 69_000_000);

    let seller_before = m.balance(&seller);
    let organizer_before = m.balance(&m.admin);
    let treasury_before = m.balance(&m.treasury);

    // 6 TCOIN plus 10% royalty and 5% platform fee
    m.approve(&buyer, 69_000_000);
    m.client.buy_resale_ticket(&buyer, &6);

    assert_eq!(m.client.owner_of(&6), buyer);
    assert_eq!(m.balance(&buyer), 10 * TCOIN - 69_000_000);
    assert_eq!(m.balance(&seller) - seller_before, 6 * TCOIN);
    assert_eq!(m.balance(&m.admin) - organizer_before, 6_000_000);
    assert_eq!(m.balance(&m.treasury) - treasury_before, 3_000_000);

    // the listing is cleared by the sale
    assert_eq!(m.client.secondary_sale_price(&6), 0);
    assert_eq!(m.client.ticket_status(&6), TicketStatus::Held);
    let repeat = m.client.try_buy_resale_ticket(&seller, &6);
    assert_eq!(repeat, Err(Ok(MarketplaceError::NotListedForResale)));
}

#[test]
fn test_resale_requires_listing() {
    let m = setup_test();
    let buyer = m.buyer();
    m.approve(&buyer, 10 * TCOIN);

    let result = m.client.try_buy_resale_ticket(&buyer, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::NotListedForResale)));

    m.client.buy_ticket(&buyer, &1, &1);
    let other = m.buyer();
    m.approve(&other, 10 * TCOIN);
    let result = m.client.try_buy_resale_ticket(&other, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::NotListedForResale)));

    let result = m.client.try_buy_resale_ticket(&other, &42);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketNotFound)));
}

#[test]
fn test_resale_rejects_own_ticket_and_short_allowance() {
    let m = setup_test();
    let seller = m.buyer();
    m.approve(&seller, 10 * TCOIN);
    m.client.buy_ticket(&seller, &1, &1);
    m.client.list_ticket_for_sale(&seller, &1, &(2 * TCOIN));

    m.approve(&seller, 10 * TCOIN);
    let result = m.client.try_buy_resale_ticket(&seller, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::CannotBuyOwnTicket)));

    // enough for price and platform fee, not for the royalty
    let buyer = m.buyer();
    m.approve(&buyer, 2 * TCOIN + TCOIN / 10);
    let result = m.client.try_buy_resale_ticket(&buyer, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::InsufficientAllowance)));
    assert_eq!(m.client.owner_of(&1), seller);
}

#[test]
fn test_list_ticket_for_sale_validation() {
    let m = setup_test();
    let owner = m.buyer();
    let stranger = m.buyer();

    let result = m.client.try_list_ticket_for_sale(&owner, &1, &0);
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));

    let result = m.client.try_list_ticket_for_sale(&owner, &1, &TCOIN);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketNotMinted)));

    m.approve(&owner, 10 * TCOIN);
    m.client.buy_ticket(&owner, &1, &1);

    let result = m.client.try_list_ticket_for_sale(&stranger, &1, &TCOIN);
    assert_eq!(result, Err(Ok(MarketplaceError::NotTicketOwner)));
    assert_eq!(m.client.secondary_sale_price(&1), 0);

    let result = m.client.try_list_ticket_for_sale(&owner, &1, &-TCOIN);
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));
}

#[test]
fn test_listing_price_must_leave_room_for_fees() {
    let m = setup_test();
    let seller = m.buyer();
    let buyer = m.buyer();
    m.approve(&seller, 10 * TCOIN);
    m.approve(&buyer, 10 * TCOIN);
    m.client.buy_ticket(&seller, &1, &1);

    let result = m.client.try_list_ticket_for_sale(&seller, &1, &(i128::MAX / 2));
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));

    // Would fit at today's fees, but not if the admin raised them to 100%.
    let result = m.client.try_list_ticket_for_sale(&seller, &1, &(i128::MAX / 50));
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));

    assert_eq!(m.client.ticket_status(&1), TicketStatus::Held);
    assert_eq!(m.client.try_quote(&1), Err(Ok(MarketplaceError::NotListedForResale)));
    let result = m.client.try_buy_resale_ticket(&buyer, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::NotListedForResale)));

    // The largest quotable listing still quotes and fails cleanly on funds.
    let ceiling = i128::MAX / 300;
    m.client.list_ticket_for_sale(&seller, &1, &ceiling);
    m.client.set_platform_fee_percentage(&m.admin, &100);
    m.client.set_royalty_percentage(&m.admin, &100);
    assert_eq!(m.client.quote(&1).total, ceiling * 3);
    let result = m.client.try_buy_resale_ticket(&buyer, &1);
    assert_eq!(result, Err(Ok(MarketplaceError::InsufficientAllowance)));
}

#[test]
fn test_transfer_ticket() {
    let m = setup_test();
    let owner = m.buyer();
    let friend = Address::generate(&m.env);
    m.approve(&owner, 10 * TCOIN);
    m.client.buy_ticket(&owner, &1, &1);
    m.client.list_ticket_for_sale(&owner, &1, &(5 * TCOIN));

    m.client.transfer_ticket(&owner, &1, &friend);

    assert_eq!(m.client.owner_of(&1), friend);
    assert_eq!(m.client.secondary_sale_price(&1), 0);
    // no payment is involved
    assert_eq!(m.balance(&friend), 0);

    let result = m.client.try_transfer_ticket(&owner, &1, &owner);
    assert_eq!(result, Err(Ok(MarketplaceError::NotTicketOwner)));
    let result = m.client.try_transfer_ticket(&friend, &1, &friend);
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidAddress)));
    let result = m.client.try_transfer_ticket(&friend, &2, &owner);
    assert_eq!(result, Err(Ok(MarketplaceError::TicketNotMinted)));
}

#[test]
fn test_verify_ticket() {
    let m = setup_test();

    // never created
    assert_eq!(
        m.client.try_verify_ticket(&10),
        Err(Ok(MarketplaceError::TicketNotFound))
    );
    // created but never sold
    assert_eq!(
        m.client.try_verify_ticket(&1),
        Err(Ok(MarketplaceError::TicketNotMinted))
    );
    assert_eq!(
        m.client.try_owner_of(&1),
        Err(Ok(MarketplaceError::TicketNotMinted))
    );

    let buyer = m.buyer();
    m.approve(&buyer, 10 * TCOIN);
    m.client.buy_ticket(&buyer, &1, &1);
    assert!(m.client.verify_ticket(&1));
}

#[test]
fn test_pause_blocks_trading() {
    let m = setup_test();
    let buyer = m.buyer();
    let reseller = m.buyer();
    let friend = Address::generate(&m.env);
    m.approve(&buyer, 10 * TCOIN);
    m.approve(&reseller, 10 * TCOIN);
    m.client.buy_ticket(&buyer, &1, &1);
    m.client.buy_ticket(&reseller, &1, &3);
    m.client.list_ticket_for_sale(&reseller, &3, &(2 * TCOIN));

    m.client.pause_marketplace(&m.admin);
    assert!(m.client.is_paused());

    assert_eq!(
        m.client.try_buy_ticket(&buyer, &1, &2),
        Err(Ok(MarketplaceError::MarketplacePaused))
    );
    assert_eq!(
        m.client.try_buy_resale_ticket(&buyer, &3),
        Err(Ok(MarketplaceError::MarketplacePaused))
    );
    assert_eq!(m.client.owner_of(&3), reseller);
    assert_eq!(m.client.ticket_status(&3), TicketStatus::Listed);
    assert_eq!(
        m.client.try_transfer_ticket(&buyer, &1, &friend),
        Err(Ok(MarketplaceError::MarketplacePaused))
    );
    assert_eq!(
        m.client.try_list_ticket_for_sale(&buyer, &1, &TCOIN),
        Err(Ok(MarketplaceError::MarketplacePaused))
    );
    assert_eq!(
        m.client.try_pause_marketplace(&m.admin),
        Err(Ok(MarketplaceError::AlreadyPaused))
    );

    m.client.resume_marketplace(&m.admin);
    assert_eq!(
        m.client.try_resume_marketplace(&m.admin),
        Err(Ok(MarketplaceError::NotPaused))
    );
    m.client.buy_ticket(&buyer, &1, &2);
    m.client.buy_resale_ticket(&buyer, &3);
    assert_eq!(m.client.owner_of(&3), buyer);
    m.client.pause_marketplace(&m.admin);
}

#[test]
fn test_admin_operations_reject_other_callers() {
    let m = setup_test();
    let mut callers = Vec::new(&m.env);
    callers.push_back(m.treasury.clone());
    callers.push_back(m.buyer());
    for _ in 0..3 {
        callers.push_back(Address::generate(&m.env));
    }

    for caller in callers.iter() {
        assert_eq!(m.client.try_pause_marketplace(&caller), Err(Ok(MarketplaceError::NotAdmin)));
        assert_eq!(m.client.try_resume_marketplace(&caller), Err(Ok(MarketplaceError::NotAdmin)));
        assert_eq!(m.client.try_set_admin(&caller, &caller), Err(Ok(MarketplaceError::NotAdmin)));
        assert_eq!(
            m.client.try_set_treasury_wallet(&caller, &caller),
            Err(Ok(MarketplaceError::NotAdmin))
        );
        assert_eq!(
            m.client.try_set_royalty_percentage(&caller, &12),
            Err(Ok(MarketplaceError::NotAdmin))
        );
        assert_eq!(
            m.client.try_set_platform_fee_percentage(&caller, &8),
            Err(Ok(MarketplaceError::NotAdmin))
        );
        assert_eq!(
            m.client.try_set_ticket_price(&caller, &1, &1, &(2 * TCOIN)),
            Err(Ok(MarketplaceError::NotAdmin))
        );
        assert_eq!(
            m.client.try_create_event(
                &caller,
                &details(&m.env),
                &vec![&m.env, TCOIN],
                &vec![&m.env, 1u32],
                &1
            ),
            Err(Ok(MarketplaceError::NotAdmin))
        );
    }

    // nothing changed
    assert_eq!(m.client.owner(), m.admin);
    assert_eq!(m.client.treasury_wallet(), m.treasury);
    assert_eq!(m.client.royalty_percent(), 10);
    assert_eq!(m.client.platform_fee_percent(), 5);
    assert_eq!(m.client.ticket(&1).price, TCOIN);
    assert!(!m.client.is_paused());
}

#[test]
fn test_percentage_bounds() {
    let m = setup_test();

    for percent in [101u32, 150, 1_000, u32::MAX] {
        assert_eq!(
            m.client.try_set_platform_fee_percentage(&m.admin, &percent),
            Err(Ok(MarketplaceError::InvalidPercentage))
        );
        assert_eq!(
            m.client.try_set_royalty_percentage(&m.admin, &percent),
            Err(Ok(MarketplaceError::InvalidPercentage))
        );
    }
    assert_eq!(m.client.platform_fee_percent(), 5);
    assert_eq!(m.client.royalty_percent(), 10);

    for percent in [0u32, 8, 12, 100] {
        m.client.set_platform_fee_percentage(&m.admin, &percent);
        m.client.set_royalty_percentage(&m.admin, &percent);
        assert_eq!(m.client.platform_fee_percent(), percent);
        assert_eq!(m.client.royalty_percent(), percent);
    }
}

#[test]
fn test_admin_settings() {
    let m = setup_test();
    let new_treasury = Address::generate(&m.env);
    let new_admin = Address::generate(&m.env);

    m.client.set_treasury_wallet(&m.admin, &new_treasury);
    assert_eq!(m.client.treasury_wallet(), new_treasury);

    m.client.set_ticket_price(&m.admin, &1, &2, &TCOIN);
    assert_eq!(m.client.ticket(&2).price, TCOIN);
    assert_eq!(
        m.client.try_set_ticket_price(&m.admin, &1, &9, &TCOIN),
        Err(Ok(MarketplaceError::TicketNotFound))
    );

    m.client.set_admin(&m.admin, &new_admin);
    assert_eq!(m.client.owner(), new_admin);
    assert_eq!(
        m.client.try_pause_marketplace(&m.admin),
        Err(Ok(MarketplaceError::NotAdmin))
    );
    m.client.pause_marketplace(&new_admin);

    let settings = m.client.settings();
    assert_eq!(settings.admin, new_admin);
    assert_eq!(settings.treasury, new_treasury);
    assert!(settings.paused);
    assert_eq!(settings.next_ticket_id, 4);
}

#[test]
fn test_repriced_ticket_sells_at_new_price() {
    let m = setup_test();
    let buyer = m.buyer();
    m.client.set_ticket_price(&m.admin, &1, &3, &TCOIN);

    m.approve(&buyer, 10 * TCOIN);
    m.client.buy_ticket(&buyer, &1, &3);

    assert_eq!(m.balance(&buyer), 10 * TCOIN - 10_500_000);

    let result = m.client.try_set_ticket_price(&m.admin, &1, &2, &(i128::MAX / 2));
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));
    let result = m.client.try_set_ticket_price(&m.admin, &1, &2, &-1);
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));
    assert_eq!(m.client.ticket(&2).price, 2 * TCOIN);
}
