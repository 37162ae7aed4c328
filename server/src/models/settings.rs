use serde::Serialize;

use crate::models::AccountId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketplaceSettings {
    pub marketplace: AccountId,
    pub admin: AccountId,
    pub treasury: AccountId,
    pub payment_token: AccountId,
    pub platform_fee_percent: u32,
    pub royalty_percent: u32,
    pub paused: bool,
    pub next_event_id: u64,
    pub next_ticket_id: u64,
}
