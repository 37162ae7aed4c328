use serde::Serialize;
use tracing::debug;

use crate::chain::amount::Amount;
use crate::chain::ChainError;
use crate::client::MarketplaceClient;
use crate::models::{AccountId, TicketStatus};
use crate::views::{all_tickets, EventCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    Primary,
    Resale,
}

/// A ticket currently for sale, as shown on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub ticket_id: u64,
    pub event_id: u64,
    pub event_name: String,
    pub date: String,
    pub location: String,
    pub seat_number: u32,
    pub sale: SaleKind,
    pub asking_price: Amount,
    /// Current owner for resale listings.
    pub seller: Option<AccountId>,
}

/// Every ticket that can be bought right now. Held tickets are left out.
pub async fn home_listing(client: &MarketplaceClient) -> Result<Vec<Listing>, ChainError> {
    let mut events = EventCache::new(client);
    let mut listings = Vec::new();

    for snapshot in all_tickets(client).await? {
        let sale = match snapshot.status {
            TicketStatus::Available => SaleKind::Primary,
            TicketStatus::Listed => SaleKind::Resale,
            TicketStatus::Held => continue,
        };
        let Some(asking_price) = snapshot.asking_price() else {
            continue;
        };
        let event = events.get(snapshot.ticket.event_id).await?;

        listings.push(Listing {
            ticket_id: snapshot.ticket.ticket_id,
            event_id: event.event_id,
            event_name: event.name,
            date: event.date,
            location: event.location,
            seat_number: snapshot.ticket.seat_number,
            sale,
            asking_price,
            seller: snapshot.owner,
        });
    }

    debug!(count = listings.len(), "Built home listing");
    Ok(listings)
}
