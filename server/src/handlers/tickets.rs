use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chain::amount::Amount;
use crate::models::AccountId;
use crate::utils::response::{success, ApiResult};
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListingRequest {
    /// Resale price in TCOIN.
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub to: AccountId,
}

#[derive(Serialize)]
struct VerifyPayload {
    ticket_id: u64,
    valid: bool,
}

pub async fn list_tickets(State(state): State<AppState>) -> ApiResult {
    let listings = views::home_listing(&state.marketplace).await?;
    Ok(success(listings, "Tickets retrieved"))
}

pub async fn get_ticket(State(state): State<AppState>, Path(ticket_id): Path<u64>) -> ApiResult {
    let detail = views::card_detail(&state.marketplace, ticket_id).await?;
    Ok(success(detail, "Ticket retrieved"))
}

pub async fn purchase(State(state): State<AppState>, Path(ticket_id): Path<u64>) -> ApiResult {
    let signer = state.session.signer().await?;
    let purchase = state.marketplace.purchase(&signer, ticket_id).await?;
    Ok(success(purchase, "Ticket purchased"))
}

pub async fn list_for_sale(
    State(state): State<AppState>,
    Path(ticket_id): Path<u64>,
    Json(request): Json<ListingRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let price = Amount::from_tcoin(request.price)?;
    let settled = state
        .marketplace
        .list_ticket_for_sale(&signer, ticket_id, price)
        .await?;
    Ok(success(settled.receipt, "Ticket listed for resale"))
}

pub async fn transfer(
    State(state): State<AppState>,
    Path(ticket_id): Path<u64>,
    Json(request): Json<TransferRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state
        .marketplace
        .transfer_ticket(&signer, ticket_id, &request.to)
        .await?;
    Ok(success(settled.receipt, "Ticket transferred"))
}

pub async fn verify(State(state): State<AppState>, Path(ticket_id): Path<u64>) -> ApiResult {
    let valid = state.marketplace.verify_ticket(ticket_id).await?;
    Ok(success(VerifyPayload { ticket_id, valid }, "Ticket verified"))
}
