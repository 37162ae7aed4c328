use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chain::amount::Amount;
use crate::models::{EventDraft, TxReceipt};
use crate::utils::error::AppError;
use crate::utils::response::{created, success, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    /// One TCOIN price per ticket.
    pub prices: Vec<Decimal>,
    pub seats: Vec<u32>,
    pub total_tickets: u32,
}

impl CreateEventRequest {
    fn into_draft(self) -> Result<EventDraft, AppError> {
        let prices = self
            .prices
            .into_iter()
            .map(Amount::from_tcoin)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EventDraft {
            name: self.name,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
            prices,
            seats: self.seats,
            total_tickets: self.total_tickets,
        })
    }
}

#[derive(Serialize)]
struct EventCreatedPayload {
    event_id: u64,
    receipt: TxReceipt,
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult {
    let signer = state.session.signer().await?;
    let draft = request.into_draft()?;
    let settled = state.marketplace.create_event(&signer, draft).await?;

    Ok(created(
        EventCreatedPayload {
            event_id: settled.result,
            receipt: settled.receipt,
        },
        "Event created",
    ))
}

pub async fn get_event(State(state): State<AppState>, Path(event_id): Path<u64>) -> ApiResult {
    let event = state.marketplace.event(event_id).await?;
    Ok(success(event, "Event retrieved"))
}
