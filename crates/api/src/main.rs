use std::net::SocketAddr;
use std::sync::Arc;

use registry_db::repositories::CustomerRepository;
use registry_db::store::{CustomerStore, InMemoryCustomerStore, PgCustomerStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registry_api::config::{ServerConfig, StorageBackend};
use registry_api::router::build_app_router;
use registry_api::service::CustomerService;
use registry_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    dotenvy::from_filename(".env.local").ok();

    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Loaded server configuration"
    );

    // --- Storage ---
    let store: Arc<dyn CustomerStore> = match config.storage {
        StorageBackend::Postgres => Arc::new(PgCustomerStore::new(connect_database().await)),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory customer store; data will not survive a restart");
            Arc::new(InMemoryCustomerStore::new())
        }
    };

    // --- App state ---
    let state = AppState {
        customers: CustomerService::new(CustomerRepository::new(store)),
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

/// Human-readable logs by default; `LOG_FORMAT=json` for structured output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "registry_api=debug,registry_db=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Connect, verify, and migrate the PostgreSQL database.
async fn connect_database() -> registry_db::DbPool {
    let db_config =
        registry_db::DatabaseConfig::from_env().expect("Invalid database configuration");
    tracing::info!(target_db = %db_config.redacted_target(), "Connecting to database");

    let pool = registry_db::create_pool(&db_config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    registry_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    registry_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
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
