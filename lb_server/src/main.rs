//! Leaderboard score server.
//!
//! Validates session cookies against the user backend and records score
//! submissions, keeping each user's best submission flagged as their
//! personal highscore.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use leaderboard::{
    auth::AuthGate,
    db::{Database, PgScoreRepository, PgUserRepository},
    scores::ScoreManager,
};
use lb_server::{api, config::ServerConfig, logging, metrics};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run the leaderboard score server

USAGE:
  lb_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:3000)
  DATABASE_URL             PostgreSQL connection string
  SESSION_SECRET           HS256 secret for session cookie verification (required)
  SESSION_COOKIE           Session cookie name  [default: session]
  METRICS_BIND             Prometheus exporter address (unset disables metrics)
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;
    config.validate()?;

    // Initialize database
    info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    db.health_check()
        .await
        .map_err(|e| anyhow::anyhow!("Database health check failed: {}", e))?;

    info!("Database connected successfully");

    // Create the auth gate and score manager
    let auth_gate = Arc::new(AuthGate::new(
        Arc::new(PgUserRepository::new(db.pool().clone())),
        config.security.session_secret.clone(),
        config.security.session_cookie.clone(),
    ));
    let score_manager = Arc::new(ScoreManager::new(Arc::new(PgScoreRepository::new(
        db.pool().clone(),
    ))));

    // Metrics exporter (optional)
    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(Error::msg)?;
        info!("Metrics exporter listening on {}", addr);
    }

    // Create API state and router
    let api_state = api::AppState {
        auth_gate,
        score_manager,
    };
    let app = api::create_router(api_state);

    // Start HTTP server
    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
