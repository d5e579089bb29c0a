use std::future::IntoFuture;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use banner_core::retry::connect_with_retry;
use banner_core::store::CacheStore;
use banner_db::memory::MemoryCacheStore;
use banner_db::repositories::{PgCacheStore, PgIdentityRepo};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banner_identity::config::{ServerConfig, SessionBackend};
use banner_identity::router::{build_app_router, build_rpc_router};
use banner_identity::service::IdentityService;
use banner_identity::session::SessionStore;
use banner_identity::state::AppState;
use banner_identity::background;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        rpc_port = config.rpc_port,
        session_backend = ?config.session_backend,
        "Loaded identity configuration"
    );

    // --- Database ---
    let pool = banner_db::create_pool(&config.database_url, &config.connect_retry).await?;
    tracing::info!("Database connection pool created");

    banner_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Session store ---
    let cache: Arc<dyn CacheStore> = match config.session_backend {
        SessionBackend::Memory => Arc::new(MemoryCacheStore::new()),
        SessionBackend::Postgres => Arc::new(PgCacheStore::new(pool.clone())),
    };
    connect_with_retry("session store", &config.connect_retry, || {
        let cache = Arc::clone(&cache);
        async move { cache.ping().await }
    })
    .await?;
    tracing::info!("Session store reachable");

    // --- Service ---
    let service = Arc::new(IdentityService::new(
        Arc::new(PgIdentityRepo::new(pool)),
        SessionStore::new(cache, config.session_ttl),
    ));

    if let (Some(login), Some(password)) = (&config.admin_login, &config.admin_password) {
        service.ensure_admin(login, password).await?;
    }

    let state = AppState {
        service: Arc::clone(&service),
        config: Arc::new(config.clone()),
    };

    // --- Background ---
    let cancel = CancellationToken::new();
    let purge_handle = tokio::spawn(background::session_purge::run(
        Arc::clone(&service),
        config.session_purge_interval,
        cancel.clone(),
    ));

    // --- Listeners ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let public_addr = SocketAddr::new(host, config.port);
    let rpc_addr = SocketAddr::new(host, config.rpc_port);

    let public_listener = tokio::net::TcpListener::bind(public_addr)
        .await
        .with_context(|| format!("Failed to bind {public_addr}"))?;
    let rpc_listener = tokio::net::TcpListener::bind(rpc_addr)
        .await
        .with_context(|| format!("Failed to bind {rpc_addr}"))?;
    tracing::info!(%public_addr, %rpc_addr, "Starting identity service");

    let public = axum::serve(public_listener, build_app_router(state.clone(), &config))
        .with_graceful_shutdown(wait_cancelled(cancel.clone()))
        .into_future();
    let rpc = axum::serve(rpc_listener, build_rpc_router(state, &config))
        .with_graceful_shutdown(wait_cancelled(cancel.clone()))
        .into_future();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    // Either listener exiting stops the process.
    let result = tokio::select! {
        r = public => r.context("Public server error"),
        r = rpc => r.context("RPC server error"),
    };

    // --- Post-shutdown cleanup ---
    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), purge_handle).await;
    tracing::info!("Graceful shutdown complete");

    result
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "banner_identity=debug,banner_db=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn wait_cancelled(cancel: CancellationToken) {
    cancel.cancelled().await;
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
