use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use taskgate::logging::init_tracing;
use taskgate::router::init_router;
use taskgate::state::AppState;
use taskgate_config::{CorsConfig, JwtConfig, LogConfig, RateLimitConfig, ServerConfig};
use taskgate_db::{MIGRATOR, PgStore, init_db_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let log_config = LogConfig::from_env();
    let _log_guard = init_tracing(&log_config);

    let jwt_config = JwtConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;
    let cors_config = CorsConfig::from_env();
    let rate_limit_config = RateLimitConfig::from_env()?;

    let pool = init_db_pool(&server_config.database_url)
        .await
        .context("Failed to connect to database")?;
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        jwt_config,
        cors_config,
        rate_limit_config,
    );
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server listening");
    info!("Scalar UI available at http://localhost:{}/scalar", server_config.port);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
