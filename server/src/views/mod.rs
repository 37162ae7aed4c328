//! Read models assembled from several ledger reads.
//!
//! Lookups go through the typed ticket status, so "not for sale" or "not
//! owned" is an ordinary value. Any failed read aborts the whole view.

pub mod card;
pub mod home;
pub mod profile;

pub use card::{card_detail, CardDetail};
pub use home::{home_listing, Listing, SaleKind};
pub use profile::{profile, Profile};

use std::collections::HashMap;

use crate::chain::ChainError;
use crate::client::MarketplaceClient;
use crate::models::{Event, TicketSnapshot};

/// Snapshots of every ticket minted so far, in id order.
async fn all_tickets(client: &MarketplaceClient) -> Result<Vec<TicketSnapshot>, ChainError> {
    let next_ticket_id = client.next_ticket_id().await?;
    let mut tickets = Vec::with_capacity(next_ticket_id.saturating_sub(1) as usize);
    for ticket_id in 1..next_ticket_id {
        tickets.push(client.ticket_snapshot(ticket_id).await?);
    }
    Ok(tickets)
}

/// Memoizes event reads while building a view.
struct EventCache<'a> {
    client: &'a MarketplaceClient,
    events: HashMap<u64, Event>,
}

impl<'a> EventCache<'a> {
    fn new(client: &'a MarketplaceClient) -> Self {
        Self {
            client,
            events: HashMap::new(),
        }
    }

    async fn get(&mut self, event_id: u64) -> Result<Event, ChainError> {
        if let Some(event) = self.events.get(&event_id) {
            return Ok(event.clone());
        }
        let event = self.client.event(event_id).await?;
        self.events.insert(event_id, event.clone());
        Ok(event)
    }
}
