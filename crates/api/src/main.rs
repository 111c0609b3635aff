use std::net::SocketAddr;
use std::sync::Arc;

use catering_core::cache::ImageCache;
use catering_core::clock::SystemClock;
use catering_core::gallery::PortfolioGallery;
use catering_core::store::PortfolioStore;
use catering_db::{PgPortfolioStore, RestConfig, RestPortfolioStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catering_api::config::{ServerConfig, StoreSettings};
use catering_api::router::build_app_router;
use catering_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "catering_api=debug,catering_core=debug,catering_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        cache_ttl_secs = config.cache_ttl_secs,
        "Loaded server configuration",
    );

    // --- Store ---
    let store = connect_store(&config.store).await;

    // --- Gallery ---
    let cache = ImageCache::new(config.cache_ttl(), Arc::new(SystemClock));
    let gallery = Arc::new(PortfolioGallery::new(store, cache));

    // --- App state ---
    let state = AppState {
        gallery,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Open the configured backing store. Any failure here is fatal.
async fn connect_store(settings: &StoreSettings) -> Arc<dyn PortfolioStore> {
    match settings {
        StoreSettings::Postgres { database_url } => {
            let pool = catering_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            catering_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            catering_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgPortfolioStore::new(pool))
        }
        StoreSettings::Rest { url, api_key } => {
            let store = RestPortfolioStore::new(&RestConfig::new(url.as_str(), api_key.as_str()))
                .expect("Failed to build REST store client");
            tracing::info!(%url, "Using REST portfolio store");

            // Hosted stores can be briefly unreachable; start anyway and let
            // the gallery serve empty pages until it recovers.
            if let Err(err) = store.health_check().await {
                tracing::warn!(error = %err, "REST store health check failed at startup");
            }

            Arc::new(store)
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
