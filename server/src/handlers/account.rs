use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::chain::amount::Amount;
use crate::journal::JOURNAL_CAPACITY;
use crate::models::{AccountId, TxReceipt};
use crate::utils::response::{created, success, ApiResult};
use crate::views;
use crate::AppState;

const DEFAULT_TRANSACTION_LIMIT: usize = 20;

#[derive(Serialize)]
struct BalancePayload {
    account: AccountId,
    balance: Amount,
}

#[derive(Serialize)]
struct FaucetPayload {
    account: AccountId,
    minted: Amount,
    balance: Amount,
    receipt: Option<TxReceipt>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub limit: Option<usize>,
}

pub async fn balance(State(state): State<AppState>) -> ApiResult {
    let signer = state.session.signer().await?;
    let balance = state.token.balance_of(signer.account()).await?;
    Ok(success(
        BalancePayload {
            account: signer.account().clone(),
            balance,
        },
        "Balance retrieved",
    ))
}

pub async fn faucet(State(state): State<AppState>) -> ApiResult {
    let signer = state.session.signer().await?;
    let minted = state
        .token
        .fund_if_empty(&signer, state.config.faucet_amount)
        .await?;
    let balance = state.token.balance_of(signer.account()).await?;

    match minted {
        Some(settled) => Ok(created(
            FaucetPayload {
                account: signer.account().clone(),
                minted: state.config.faucet_amount,
                balance,
                receipt: Some(settled.receipt),
            },
            "Demo TCOIN minted",
        )),
        None => Ok(success(
            FaucetPayload {
                account: signer.account().clone(),
                minted: Amount::ZERO,
                balance,
                receipt: None,
            },
            "Wallet already holds TCOIN",
        )),
    }
}

pub async fn profile(State(state): State<AppState>) -> ApiResult {
    let signer = state.session.signer().await?;
    let profile = views::profile(&state.marketplace, &state.token, signer.account()).await?;
    Ok(success(profile, "Profile retrieved"))
}

pub async fn transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_TRANSACTION_LIMIT)
        .min(JOURNAL_CAPACITY);
    let receipts = state.journal.recent(signer.account(), limit).await;
    Ok(success(receipts, "Transactions retrieved"))
}
