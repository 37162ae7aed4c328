use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializationEvent {
    pub admin: Address,
    pub treasury: Address,
    pub payment_token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventCreated {
    #[topic]
    pub event_id: u64,
    pub organizer: Address,
    pub first_ticket_id: u64,
    pub total_tickets: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketPurchased {
    #[topic]
    pub ticket_id: u64,
    #[topic]
    pub buyer: Address,
    pub event_id: u64,
    pub price: i128,
    pub platform_fee: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketListed {
    #[topic]
    pub ticket_id: u64,
    pub seller: Address,
    pub price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResaleCompleted {
    #[topic]
    pub ticket_id: u64,
    #[topic]
    pub buyer: Address,
    pub seller: Address,
    pub price: i128,
    pub royalty: i128,
    pub platform_fee: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketTransferred {
    #[topic]
    pub ticket_id: u64,
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChanged {
    pub paused: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesUpdated {
    pub platform_fee_percent: u32,
    pub royalty_percent: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryChanged {
    pub treasury: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChanged {
    pub previous: Address,
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketRepriced {
    #[topic]
    pub ticket_id: u64,
    pub event_id: u64,
    pub price: i128,
}
