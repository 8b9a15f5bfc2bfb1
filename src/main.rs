use jobboard::{AppState, Settings};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let listen_addr = settings.listen_addr.clone();

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(&settings.database_url)
        .await?;

    let app_state = AppState::new(db_pool, settings).await?;
    let app = jobboard::app(app_state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!("listening on {listen_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(%err, "could not listen for ctrl+c");
                std::future::pending::<()>().await;
            }
            tracing::info!("received ctrl+c, shutting down");
        })
        .await?;

    Ok(())
}
