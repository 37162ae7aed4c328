use serde::Serialize;

use crate::chain::amount::Amount;
use crate::models::AccountId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub ticket_id: u64,
    pub event_id: u64,
    pub seat_number: u32,
    /// Primary sale price.
    pub price: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Never sold; purchasable at the primary price.
    Available,
    /// Owned and listed for resale.
    Listed,
    /// Owned and not for sale.
    Held,
}

impl From<ticket_marketplace::TicketStatus> for TicketStatus {
    fn from(status: ticket_marketplace::TicketStatus) -> Self {
        match status {
            ticket_marketplace::TicketStatus::Available => TicketStatus::Available,
            ticket_marketplace::TicketStatus::Listed => TicketStatus::Listed,
            ticket_marketplace::TicketStatus::Held => TicketStatus::Held,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub price: Amount,
    pub platform_fee: Amount,
    pub royalty: Amount,
    pub total: Amount,
}

impl From<ticket_marketplace::PriceQuote> for PriceQuote {
    fn from(quote: ticket_marketplace::PriceQuote) -> Self {
        Self {
            price: Amount::from_units(quote.price),
            platform_fee: Amount::from_units(quote.platform_fee),
            royalty: Amount::from_units(quote.royalty),
            total: Amount::from_units(quote.total),
        }
    }
}

/// A ticket together with its lifecycle state, read in one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSnapshot {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub status: TicketStatus,
    pub owner: Option<AccountId>,
    /// Zero unless the ticket is listed.
    pub resale_price: Amount,
}

impl TicketSnapshot {
    /// The price a buyer would be asked, if the ticket is for sale at all.
    pub fn asking_price(&self) -> Option<Amount> {
        match self.status {
            TicketStatus::Available => Some(self.ticket.price),
            TicketStatus::Listed => Some(self.resale_price),
            TicketStatus::Held => None,
        }
    }
}
