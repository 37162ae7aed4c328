#![no_std]

pub mod contract;
pub mod error;
pub mod events;
pub mod fees;
pub mod storage;
pub mod types;

pub use contract::{TicketMarketplace, TicketMarketplaceClient};
pub use error::MarketplaceError;
pub use types::{
    EventDetails, EventRecord, MarketplaceSettings, PriceQuote, TicketRecord, TicketStatus,
};

#[cfg(test)]
mod test;
