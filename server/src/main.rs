use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use marketplace_server::config::Config;
use marketplace_server::routes::create_routes;
use marketplace_server::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let pool = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Successfully connected to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run migrations");
            tracing::info!("Migrations run successfully");

            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, transactions are journaled in memory only");
            None
        }
    };

    let addr = config.bind_addr;
    let state = AppState::new(config, pool)
        .await
        .expect("Failed to start sandbox ledger");
    let app = create_routes(state);

    tracing::info!("Ticket marketplace running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
