use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::AccountId;
use crate::utils::response::{empty_success, success, ApiResult};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ConnectRequest {
    /// Existing wallet account; a new one is created when omitted.
    pub account: Option<AccountId>,
}

#[derive(Serialize)]
struct AccountsPayload {
    accounts: Vec<AccountId>,
}

pub async fn get_session(State(state): State<AppState>) -> ApiResult {
    Ok(success(state.session.state().await, "Session retrieved"))
}

pub async fn connect(
    State(state): State<AppState>,
    body: Option<Json<ConnectRequest>>,
) -> ApiResult {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    state.session.connect(&state.wallet, request.account).await?;
    Ok(success(state.session.state().await, "Wallet connected"))
}

pub async fn disconnect(State(state): State<AppState>) -> ApiResult {
    if state.session.disconnect().await {
        Ok(empty_success("Wallet disconnected"))
    } else {
        Ok(empty_success("No wallet was connected"))
    }
}

pub async fn wallet_accounts(State(state): State<AppState>) -> ApiResult {
    let accounts = state.wallet.accounts().await?;
    Ok(success(AccountsPayload { accounts }, "Wallet accounts retrieved"))
}
