use serde::Serialize;

use crate::chain::amount::Amount;
use crate::chain::ChainError;
use crate::client::{MarketplaceClient, TokenClient};
use crate::models::{AccountId, Event, MarketplaceSettings, TicketSnapshot};
use crate::views::{all_tickets, EventCache};

#[derive(Debug, Clone, Serialize)]
pub struct OwnedTicket {
    #[serde(flatten)]
    pub ticket: TicketSnapshot,
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub account: AccountId,
    pub balance: Amount,
    pub is_admin: bool,
    pub tickets: Vec<OwnedTicket>,
    pub organized_events: Vec<Event>,
    pub settings: MarketplaceSettings,
}

pub async fn profile(
    marketplace: &MarketplaceClient,
    token: &TokenClient,
    account: &AccountId,
) -> Result<Profile, ChainError> {
    let settings = marketplace.settings().await?;
    let balance = token.balance_of(account).await?;
    let mut events = EventCache::new(marketplace);

    let mut tickets = Vec::new();
    for snapshot in all_tickets(marketplace).await? {
        if snapshot.owner.as_ref() != Some(account) {
            continue;
        }
        let event = events.get(snapshot.ticket.event_id).await?;
        tickets.push(OwnedTicket {
            ticket: snapshot,
            event_name: event.name,
        });
    }

    let mut organized_events = Vec::new();
    for event_id in marketplace.organizer_events(account).await? {
        organized_events.push(events.get(event_id).await?);
    }

    Ok(Profile {
        account: account.clone(),
        balance,
        is_admin: &settings.admin == account,
        tickets,
        organized_events,
        settings,
    })
}
