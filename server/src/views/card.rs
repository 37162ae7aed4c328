use serde::Serialize;

use crate::chain::ChainError;
use crate::client::MarketplaceClient;
use crate::models::{Event, PriceQuote, TicketSnapshot, TicketStatus};

#[derive(Debug, Clone, Serialize)]
pub struct CardDetail {
    pub ticket: TicketSnapshot,
    pub event: Event,
    /// What a buyer pays now; absent when the ticket is not for sale.
    pub quote: Option<PriceQuote>,
}

pub async fn card_detail(client: &MarketplaceClient, ticket_id: u64) -> Result<CardDetail, ChainError> {
    let ticket = client.ticket_snapshot(ticket_id).await?;
    let event = client.event(ticket.ticket.event_id).await?;
    let quote = match ticket.status {
        TicketStatus::Available | TicketStatus::Listed => Some(client.quote(ticket_id).await?),
        TicketStatus::Held => None,
    };

    Ok(CardDetail {
        ticket,
        event,
        quote,
    })
}
