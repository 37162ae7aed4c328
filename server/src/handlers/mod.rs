pub mod account;
pub mod admin;
pub mod events;
pub mod session;
pub mod tickets;

use axum::extract::State;
use serde::Serialize;

use crate::models::MarketplaceSettings;
use crate::utils::response::{success, ApiResult};
use crate::AppState;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> ApiResult {
    let payload = HealthPayload {
        status: "ok",
        service: "ticket-marketplace-api",
    };

    Ok(success(payload, "Health check successful"))
}

pub async fn marketplace_settings(State(state): State<AppState>) -> ApiResult {
    let settings: MarketplaceSettings = state.marketplace.settings().await?;
    Ok(success(settings, "Marketplace settings retrieved"))
}
