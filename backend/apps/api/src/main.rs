//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through `login::LoginError` and `kernel::error::AppError`.

use anyhow::{Context, bail};
use axum::{Router, response::Redirect, routing::get};
use base64::Engine;
use base64::engine::general_purpose;
use login::domain::repository::SessionRepository;
use login::{LoginConfig, PgLoginRepository, login_router};
use platform::config::DatabaseConfig;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// How often expired sessions are purged from the sessions table
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "esw_api=info,login=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let db_config = DatabaseConfig::from_env()?;
    tracing::debug!(config = ?db_config, "Database configuration loaded");

    let pool = db_config
        .pool_options()
        .connect_with(db_config.connect_options()?)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = PgLoginRepository::new(pool.clone());

    // Periodic cleanup of expired sessions; the first tick fires at startup.
    // Failures are logged and retried on the next tick.
    let cleanup_repo = repo.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = cleanup_repo.cleanup_expired().await {
                tracing::warn!(error = %e, "Session cleanup failed");
            }
        }
    });

    let config = login_config()?;

    // Build router
    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/login") }))
        .merge(login_router(repo, config))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Login configuration from the environment
fn login_config() -> anyhow::Result<LoginConfig> {
    let cookie_secure = match env::var("COOKIE_SECURE") {
        Ok(value) => value
            .trim()
            .parse()
            .context("COOKIE_SECURE must be true or false")?,
        Err(_) => !cfg!(debug_assertions),
    };

    let mut config = LoginConfig {
        session_secret: session_secret()?,
        cookie_secure,
        ..LoginConfig::default()
    };

    if let Ok(home_url) = env::var("HOME_URL") {
        config.home_url = home_url;
    }

    Ok(config)
}

/// HMAC key for the session cookie
///
/// Random per process in debug builds (sessions do not survive a restart);
/// required in release builds.
fn session_secret() -> anyhow::Result<[u8; 32]> {
    let secret_b64 = match env::var("SESSION_SECRET") {
        Ok(value) => value,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, using a random key");
            return Ok(LoginConfig::default().session_secret);
        }
        Err(_) => bail!("SESSION_SECRET must be set in production"),
    };

    let secret_bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("SESSION_SECRET must be base64")?;

    secret_bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| {
            anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len())
        })
}
