use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketplaceError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAdmin = 3,
    MarketplacePaused = 4,
    AlreadyPaused = 5,
    NotPaused = 6,
    InvalidPercentage = 7,
    InvalidTicketCount = 8,
    TicketCountMismatch = 9,
    InvalidPrice = 10,
    EventNotFound = 11,
    SoldOut = 12,
    TicketNotFound = 13,
    TicketEventMismatch = 14,
    TicketAlreadyOwned = 15,
    TicketNotMinted = 16,
    NotTicketOwner = 17,
    NotListedForResale = 18,
    CannotBuyOwnTicket = 19,
    InsufficientAllowance = 20,
    InsufficientBalance = 21,
    InvalidAddress = 22,
}

impl MarketplaceError {
    /// Human-readable revert reason, shown to users as-is.
    pub fn reason(&self) -> &'static str {
        match self {
            MarketplaceError::AlreadyInitialized => "Contract already initialized",
            MarketplaceError::NotInitialized => "Contract not initialized",
            MarketplaceError::NotAdmin => "Caller is not the marketplace admin",
            MarketplaceError::MarketplacePaused => "Marketplace is paused",
            MarketplaceError::AlreadyPaused => "Marketplace is already paused",
            MarketplaceError::NotPaused => "Marketplace is not paused",
            MarketplaceError::InvalidPercentage => "Percentage must be between 0 and 100",
            MarketplaceError::InvalidTicketCount => "Total tickets must be greater than zero",
            MarketplaceError::TicketCountMismatch => {
                "Number of ticket prices or seat numbers does not match total tickets"
            }
            MarketplaceError::InvalidPrice => "Invalid price",
            MarketplaceError::EventNotFound => "Event does not exist",
            MarketplaceError::SoldOut => "Sold out",
            MarketplaceError::TicketNotFound => "Ticket does not exist",
            MarketplaceError::TicketEventMismatch => "Ticket does not belong to this event",
            MarketplaceError::TicketAlreadyOwned => "Ticket already sold",
            MarketplaceError::TicketNotMinted => "Ticket has not been minted",
            MarketplaceError::NotTicketOwner => "Caller does not own this ticket",
            MarketplaceError::NotListedForResale => "Ticket not listed for resale",
            MarketplaceError::CannotBuyOwnTicket => "Cannot buy your own ticket",
            MarketplaceError::InsufficientAllowance => "Insufficient allowance",
            MarketplaceError::InsufficientBalance => "Insufficient balance",
            MarketplaceError::InvalidAddress => "Invalid address",
        }
    }
}
