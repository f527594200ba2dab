use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opencrochet_api::config::ServerConfig;
use opencrochet_api::router::build_app_router;
use opencrochet_api::state::AppState;
use opencrochet_core::catalog::Catalog;
use opencrochet_core::seed::default_tutorials;
use opencrochet_db::PgTutorialStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opencrochet_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = opencrochet_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    opencrochet_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    opencrochet_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Catalog ---
    let mut catalog = Catalog::new(Arc::new(PgTutorialStore::new(pool)));
    if config.seed_fallback {
        let fallback = default_tutorials();
        tracing::info!(tutorials = fallback.len(), "Seed fallback enabled");
        catalog = catalog.with_fallback(fallback);
    }

    // --- Router ---
    let state = AppState::new(catalog, config.clone());
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

    let shutdown = Arc::new(tokio::sync::Notify::new());
    let trigger = Arc::clone(&shutdown);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { trigger.notified().await });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
            return;
        }
        () = shutdown_signal() => {}
    }

    // --- Drain ---
    shutdown.notify_one();
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    tracing::info!(grace_secs = grace.as_secs(), "Draining in-flight requests");

    match tokio::time::timeout(grace, server).await {
        Ok(result) => {
            result.expect("Server task panicked").expect("Server error");
            tracing::info!("Graceful shutdown complete");
        }
        Err(_) => tracing::warn!("In-flight requests did not finish within the grace period"),
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
