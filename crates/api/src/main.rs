use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use banner_core::resolver::ResolverPolicy;
use banner_core::retry::connect_with_retry;
use banner_db::repositories::PgContentRepo;
use banner_rpc::{HttpIdentityClient, IdentityClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banner_api::bridge::AuthorizationBridge;
use banner_api::config::ServerConfig;
use banner_api::router::build_app_router;
use banner_api::service::BannerService;
use banner_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        identity_rpc_url = %config.identity_rpc_url,
        staleness_secs = config.staleness_secs,
        "Loaded content configuration"
    );

    // --- Database ---
    let pool = banner_db::create_pool(&config.database_url, &config.connect_retry).await?;
    tracing::info!("Database connection pool created");

    banner_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Identity service ---
    let identity: Arc<dyn IdentityClient> = Arc::new(
        HttpIdentityClient::new(config.identity_rpc_url.clone(), config.rpc_timeout)
            .context("Failed to build identity RPC client")?,
    );
    connect_with_retry("identity rpc", &config.connect_retry, || {
        let identity = Arc::clone(&identity);
        async move { identity.ping().await }
    })
    .await?;
    tracing::info!("Identity service reachable");

    // --- App state ---
    let state = AppState {
        banners: Arc::new(BannerService::new(
            Arc::new(PgContentRepo::new(pool)),
            ResolverPolicy::with_staleness_secs(config.staleness_secs),
        )),
        bridge: AuthorizationBridge::new(identity),
    };

    // --- Server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Starting content service");

    axum::serve(listener, build_app_router(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "banner_api=debug,banner_db=debug,banner_rpc=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
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
