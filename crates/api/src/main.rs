use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use checklist_api::config::ServerConfig;
use checklist_api::router::build_app_router;
use checklist_api::state::AppState;
use checklist_api::telemetry::init_tracing;
use checklist_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    init_tracing("checklist_api=debug,checklist_db=info,tower_http=debug", config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        max_upload_bytes = config.max_upload_bytes,
        "Loaded server configuration",
    );

    let pool = open_database(&config.database_url).await;

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Checklist API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    close_database(pool, Duration::from_secs(config.shutdown_timeout_secs)).await;
    tracing::info!("Shutdown complete");
}

/// Connect, verify and migrate. Any failure aborts startup.
async fn open_database(database_url: &str) -> DbPool {
    let pool = checklist_db::create_pool(database_url)
        .await
        .expect("Failed to open database");

    checklist_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    checklist_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready");
    pool
}

async fn close_database(pool: DbPool, timeout: Duration) {
    if tokio::time::timeout(timeout, pool.close()).await.is_err() {
        tracing::warn!(timeout_secs = timeout.as_secs(), "Timed out closing database pool");
    }
}

/// Resolve on SIGINT, or SIGTERM on Unix.
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

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down");
}
