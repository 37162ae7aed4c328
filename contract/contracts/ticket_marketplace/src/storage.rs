use crate::types::{DataKey, EventRecord, TicketRecord};
use soroban_sdk::{Address, Env, Vec};

pub const DEFAULT_PLATFORM_FEE_PERCENT: u32 = 5;
pub const DEFAULT_ROYALTY_PERCENT: u32 = 10;

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env, initialized: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Initialized, &initialized);
}

/// Sets the administrator address of the contract.
pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
}

/// Retrieves the administrator address of the contract.
pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Admin)
}

pub fn set_treasury(env: &Env, treasury: &Address) {
    env.storage().persistent().set(&DataKey::Treasury, treasury);
}

pub fn get_treasury(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Treasury)
}

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().persistent().set(&DataKey::PaymentToken, token);
}

pub fn get_payment_token(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::PaymentToken)
}

/// Sets the platform fee, in whole percent.
pub fn set_platform_fee(env: &Env, percent: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::PlatformFee, &percent);
}

pub fn get_platform_fee(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::PlatformFee)
        .unwrap_or(DEFAULT_PLATFORM_FEE_PERCENT)
}

/// Sets the resale royalty, in whole percent.
pub fn set_royalty(env: &Env, percent: u32) {
    env.storage().persistent().set(&DataKey::Royalty, &percent);
}

pub fn get_royalty(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Royalty)
        .unwrap_or(DEFAULT_ROYALTY_PERCENT)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().persistent().set(&DataKey::Paused, &paused);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn next_event_id(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::NextEventId)
        .unwrap_or(1)
}

pub fn next_ticket_id(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::NextTicketId)
        .unwrap_or(1)
}

/// Hands out the next event identifier and advances the counter.
pub fn allocate_event_id(env: &Env) -> u64 {
    let id = next_event_id(env);
    env.storage()
        .persistent()
        .set(&DataKey::NextEventId, &(id + 1));
    id
}

/// Hands out the next ticket identifier and advances the counter.
pub fn allocate_ticket_id(env: &Env) -> u64 {
    let id = next_ticket_id(env);
    env.storage()
        .persistent()
        .set(&DataKey::NextTicketId, &(id + 1));
    id
}

/// Stores a new event or updates an existing one.
/// Also updates the organizer's list of events.
pub fn store_event(env: &Env, event: &EventRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Event(event.event_id), event);

    let mut organizer_events = get_organizer_events(env, &event.organizer);
    if !organizer_events.contains(event.event_id) {
        organizer_events.push_back(event.event_id);
        env.storage().persistent().set(
            &DataKey::OrganizerEvents(event.organizer.clone()),
            &organizer_events,
        );
    }
}

pub fn get_event(env: &Env, event_id: u64) -> Option<EventRecord> {
    env.storage().persistent().get(&DataKey::Event(event_id))
}

/// Retrieves all event ids attributed to an organizer.
pub fn get_organizer_events(env: &Env, organizer: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::OrganizerEvents(organizer.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn store_ticket(env: &Env, ticket: &TicketRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Ticket(ticket.ticket_id), ticket);
}

pub fn get_ticket(env: &Env, ticket_id: u64) -> Option<TicketRecord> {
    env.storage().persistent().get(&DataKey::Ticket(ticket_id))
}

/// Current owner of a ticket; `None` until the primary sale.
pub fn get_ticket_owner(env: &Env, ticket_id: u64) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::TicketOwner(ticket_id))
}

pub fn set_ticket_owner(env: &Env, ticket_id: u64, owner: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::TicketOwner(ticket_id), owner);
}

/// Resale price of a ticket, zero when it is not listed.
pub fn get_resale_price(env: &Env, ticket_id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::ResalePrice(ticket_id))
        .unwrap_or(0)
}

pub fn set_resale_price(env: &Env, ticket_id: u64, price: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::ResalePrice(ticket_id), &price);
}

pub fn clear_resale_price(env: &Env, ticket_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::ResalePrice(ticket_id));
}
