use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Initialized,
    Admin,
    Treasury,
    PaymentToken,
    PlatformFee,
    Royalty,
    Paused,
    NextEventId,
    NextTicketId,
    Event(u64),
    Ticket(u64),
    TicketOwner(u64),
    ResalePrice(u64),
    OrganizerEvents(Address),
}

/// Descriptive fields of an event, as entered by the organizer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventDetails {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    pub event_id: u64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub total_tickets: u32,
    pub tickets_sold: u32,
    pub organizer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketRecord {
    pub ticket_id: u64,
    pub event_id: u64,
    pub seat_number: u32,
    /// Primary sale price in payment token base units.
    pub price: i128,
}

/// Where a ticket stands in its lifecycle.
///
/// `Available` tickets have never been bought, `Listed` tickets are owned and
/// carry a resale price, `Held` tickets are owned and not for sale.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketStatus {
    Available,
    Listed,
    Held,
}

/// Breakdown of what a buyer pays for a ticket.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceQuote {
    pub price: i128,
    pub platform_fee: i128,
    pub royalty: i128,
    pub total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketplaceSettings {
    pub admin: Address,
    pub treasury: Address,
    pub payment_token: Address,
    pub platform_fee_percent: u32,
    pub royalty_percent: u32,
    pub paused: bool,
    pub next_event_id: u64,
    pub next_ticket_id: u64,
}
