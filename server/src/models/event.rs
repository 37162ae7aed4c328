use serde::Serialize;

use crate::chain::amount::Amount;
use crate::models::AccountId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub event_id: u64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub total_tickets: u32,
    pub tickets_sold: u32,
    pub organizer: AccountId,
}

/// A new event as submitted by its organizer, one price and seat per ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub prices: Vec<Amount>,
    pub seats: Vec<u32>,
    pub total_tickets: u32,
}

impl EventDraft {
    /// Basic form checks; the contract enforces the same counts again.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
            ("description", &self.description),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(format!("{} is required", field));
        }
        if self.total_tickets == 0 {
            return Err("Total tickets must be greater than zero".to_string());
        }
        let total = self.total_tickets as usize;
        if self.prices.len() != total || self.seats.len() != total {
            return Err(
                "Number of ticket prices or seat numbers does not match total tickets.".to_string(),
            );
        }
        Ok(())
    }
}
