//! Application bootstrapper
//!
//! Owns the process lifecycle of the server binding: connect the store,
//! serve until a shutdown signal arrives, then release the connection.

use std::net::SocketAddr;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, CONFIG};
use crate::db::{self, DbConn};
use crate::endpoints;
use crate::state::AppState;

/// Bootstrap and run the application
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting invitelink v{}", env!("CARGO_PKG_VERSION"));

    let conn = init_database().await?;
    let state = AppState::from_db(conn.clone(), &CONFIG.store);

    let app = create_app(state);
    let served = serve(app).await;

    tracing::info!("Closing database connection");
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }

    served
}

/// Initialize tracing/logging; a no-op when a subscriber is already installed
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("invitelink={},tower_http=info", CONFIG.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match CONFIG.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false))
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Connect to the store and run migrations
async fn init_database() -> anyhow::Result<DbConn> {
    let conn = db::connect().await?;
    tracing::info!("Database connection established");
    Ok(conn)
}

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    endpoints::create_router(state).layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", CONFIG.server.host, CONFIG.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down gracefully..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down gracefully..."),
    }
}
