use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use coinrates_backend::app;
use coinrates_backend::config::Config;
use coinrates_backend::db::{PgRateJournal, RateJournal};
use coinrates_backend::external::coingecko::CoinGeckoProvider;
use coinrates_backend::external::rate_provider::RateProvider;
use coinrates_backend::logging::{self, LoggingConfig};
use coinrates_backend::services::ingest_service::IngestService;
use coinrates_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())?;

    let cfg = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    let journal: Arc<dyn RateJournal> = Arc::new(PgRateJournal::new(pool));
    let provider: Arc<dyn RateProvider> = Arc::new(CoinGeckoProvider::new(
        cfg.provider_api_url.clone(),
        cfg.provider_api_key.clone(),
    ));

    let cancel = CancellationToken::new();
    let ingest = IngestService::new(provider, journal.clone(), cfg.update_interval);
    let ingest_handle = tokio::spawn(ingest.run(cancel.child_token()));

    let app = app::create_app(AppState { journal });

    let listener = TcpListener::bind(&cfg.server_address).await?;
    info!("Coinrates backend listening on {}", cfg.server_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // HTTP has drained; stop the poller and wait out any in-flight poll.
    cancel.cancel();
    ingest_handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
