use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadrelay_api::config::ServerConfig;
use leadrelay_api::router::build_app_router;
use leadrelay_api::state::AppState;
use leadrelay_db::{SupabaseClient, SupabaseConfig};
use leadrelay_engine::{AnalysisEngineClient, EngineConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadrelay_api=debug,leadrelay_forward=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration (fail fast) ---
    let config = ServerConfig::from_env().unwrap_or_else(|e| fatal(&e));
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let supabase_config = SupabaseConfig::from_env().unwrap_or_else(|e| fatal(&e));
    let engine_config = EngineConfig::from_env().unwrap_or_else(|e| fatal(&e));

    // --- Collaborators ---
    let db = SupabaseClient::new(&supabase_config).unwrap_or_else(|e| fatal(&e));
    tracing::info!(url = %supabase_config.url, "Database client created");

    if let Err(e) = leadrelay_db::health_check(&db).await {
        tracing::warn!(error = %e, "Database health check failed; continuing");
    }

    let engine = AnalysisEngineClient::new(&engine_config);
    tracing::info!(url = %engine_config.base_url, "Analysis engine client created");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        db,
        engine,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse::<IpAddr>()
        .unwrap_or_else(|e| fatal(&format!("Invalid HOST address '{}': {e}", config.host)));
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| fatal(&format!("Failed to bind to {addr}: {e}")));

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Graceful shutdown complete");
}

/// Log a startup error and exit.
fn fatal(err: &dyn std::fmt::Display) -> ! {
    tracing::error!(error = %err, "Startup failed");
    std::process::exit(1);
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
