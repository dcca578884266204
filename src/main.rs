//! VaultShare Server — share lifecycle and recipient access control
//!
//! Main entry point that wires all crates together and waits for shutdown.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use vaultshare_core::config::AppConfig;
use vaultshare_core::error::AppError;
use vaultshare_core::events::EventKind;
use vaultshare_database::{
    AuditLogRepository, InMemoryAuditLogRepository, InMemoryShareRepository, ShareRepository,
};
use vaultshare_events::{AuditTrailHandler, EventDispatcher, LogStreamHandler};
use vaultshare_mirror::{HttpMirrorClient, LoopbackMirrorClient, MirrorClient};
use vaultshare_service::ShareService;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("VAULTSHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Build the share service graph and run until a shutdown signal arrives
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting VaultShare v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Repositories ─────────────────────────────────────
    let share_repo: Arc<dyn ShareRepository> = Arc::new(InMemoryShareRepository::new());
    let audit_repo: Arc<dyn AuditLogRepository> = Arc::new(InMemoryAuditLogRepository::new());

    // ── Step 2: Mirror client ────────────────────────────────────
    let mirror: Arc<dyn MirrorClient> = if config.mirror.is_remote() {
        tracing::info!("Using remote mirror at {}", config.mirror.base_url);
        Arc::new(HttpMirrorClient::new(&config.mirror)?)
    } else {
        tracing::info!("No mirror endpoint configured, using loopback mirror");
        Arc::new(LoopbackMirrorClient::new(share_repo.clone()))
    };

    // ── Step 3: Event dispatcher and consumers ───────────────────
    let dispatcher = Arc::new(EventDispatcher::new(&config.events));
    dispatcher
        .register_all(Arc::new(AuditTrailHandler::new(audit_repo.clone())))
        .await;
    dispatcher.register_all(Arc::new(LogStreamHandler::new())).await;
    for kind in EventKind::ALL {
        tracing::debug!(
            event = %kind,
            handlers = dispatcher.registry().handler_count(kind).await,
            "Event handlers registered"
        );
    }

    // ── Step 4: Share service ────────────────────────────────────
    let _share_service = Arc::new(
        ShareService::new(share_repo, mirror, config.sharing.clone()).with_events(dispatcher),
    );
    tracing::info!(
        mirror_transitions = config.sharing.mirror_transitions,
        max_recipients = config.sharing.max_recipients_per_share,
        "Share service ready"
    );

    // ── Step 5: Wait for shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
