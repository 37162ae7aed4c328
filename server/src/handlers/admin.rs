//! Marketplace administration. The contract decides who the admin is; these
//! handlers only forward the session account as the caller.

use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::chain::amount::Amount;
use crate::models::AccountId;
use crate::utils::response::{success, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PercentRequest {
    pub percent: u32,
}

#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    pub account: AccountId,
}

#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    pub price: Decimal,
}

pub async fn pause(State(state): State<AppState>) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state.marketplace.pause_marketplace(&signer).await?;
    Ok(success(settled.receipt, "Marketplace paused"))
}

pub async fn resume(State(state): State<AppState>) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state.marketplace.resume_marketplace(&signer).await?;
    Ok(success(settled.receipt, "Marketplace resumed"))
}

pub async fn set_royalty(
    State(state): State<AppState>,
    Json(request): Json<PercentRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state
        .marketplace
        .set_royalty_percentage(&signer, request.percent)
        .await?;
    Ok(success(settled.receipt, "Royalty percentage updated"))
}

pub async fn set_platform_fee(
    State(state): State<AppState>,
    Json(request): Json<PercentRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state
        .marketplace
        .set_platform_fee_percentage(&signer, request.percent)
        .await?;
    Ok(success(settled.receipt, "Platform fee percentage updated"))
}

pub async fn set_treasury(
    State(state): State<AppState>,
    Json(request): Json<AccountRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state
        .marketplace
        .set_treasury_wallet(&signer, &request.account)
        .await?;
    Ok(success(settled.receipt, "Treasury wallet updated"))
}

pub async fn set_owner(
    State(state): State<AppState>,
    Json(request): Json<AccountRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let settled = state.marketplace.set_admin(&signer, &request.account).await?;
    Ok(success(settled.receipt, "Marketplace owner updated"))
}

pub async fn set_ticket_price(
    State(state): State<AppState>,
    Path((event_id, ticket_id)): Path<(u64, u64)>,
    Json(request): Json<PriceRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let price = Amount::from_tcoin(request.price)?;
    let settled = state
        .marketplace
        .set_ticket_price(&signer, event_id, ticket_id, price)
        .await?;
    Ok(success(settled.receipt, "Ticket price updated"))
}
