use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{account, admin, events, health_check, marketplace_settings, session, tickets};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/marketplace", get(marketplace_settings))
        .route(
            "/session",
            get(session::get_session)
                .post(session::connect)
                .delete(session::disconnect),
        )
        .route("/wallet/accounts", get(session::wallet_accounts))
        .route("/balance", get(account::balance))
        .route("/faucet", post(account::faucet))
        .route("/profile", get(account::profile))
        .route("/transactions", get(account::transactions))
        .route("/events", post(events::create_event))
        .route("/events/:event_id", get(events::get_event))
        .merge(ticket_routes())
        .nest("/admin", admin_routes())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", get(tickets::list_tickets))
        .route("/tickets/:ticket_id", get(tickets::get_ticket))
        .route("/tickets/:ticket_id/purchase", post(tickets::purchase))
        .route("/tickets/:ticket_id/listing", post(tickets::list_for_sale))
        .route("/tickets/:ticket_id/transfer", post(tickets::transfer))
        .route("/tickets/:ticket_id/verify", get(tickets::verify))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/pause", post(admin::pause))
        .route("/resume", post(admin::resume))
        .route("/royalty", put(admin::set_royalty))
        .route("/platform-fee", put(admin::set_platform_fee))
        .route("/treasury", put(admin::set_treasury))
        .route("/owner", put(admin::set_owner))
        .route(
            "/events/:event_id/tickets/:ticket_id/price",
            put(admin::set_ticket_price),
        )
}
