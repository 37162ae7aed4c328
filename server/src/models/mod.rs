pub mod account;
pub mod event;
pub mod settings;
pub mod ticket;
pub mod transaction;

pub use account::AccountId;
pub use event::{Event, EventDraft};
pub use settings::MarketplaceSettings;
pub use ticket::{PriceQuote, Ticket, TicketSnapshot, TicketStatus};
pub use transaction::{TxReceipt, TxStatus};
