//! Service entry point: load configuration, connect to PostgreSQL, run
//! migrations, and serve until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use account_api::api::handlers::AppState;
use account_api::api::security::{RateLimiter, RateLimiterConfig};
use account_api::api;
use account_api::config::AppConfig;
use account_api::database::users::PgUserStore;
use account_api::service::{JwtService, UserService};

/// Grace period before a second interrupt or a hung shutdown forces exit
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.server.log_level),
    )
    .init();

    log::info!("Starting account-api v{}", account_api::VERSION);

    if let Err(e) = run(config).await {
        log::error!("Fatal: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = config.database.create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database ready");

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret)?);
    let user_service = Arc::new(UserService::new(
        Arc::new(PgUserStore::new(pool)),
        jwt_service.clone(),
    ));

    let state = AppState {
        user_service,
        jwt_service,
    };

    let limiter = Arc::new(RateLimiter::new(RateLimiterConfig {
        max_requests: config.security.rate_limit_max_requests,
        window: config.security.rate_limit_window,
    }));
    let whitelist = Arc::new(config.security.whitelist_urls.clone());

    let app = api::create_router(state, limiter, whitelist);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    log::info!("Shutdown complete");
    Ok(())
}

/// Resolve on SIGINT. In-flight requests get a grace period; a timer then
/// forces exit so a stuck connection cannot keep the process alive.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install interrupt handler: {}", e);
        return;
    }

    log::info!("Interrupt received, shutting down");

    tokio::spawn(async {
        tokio::time::sleep(SHUTDOWN_GRACE).await;
        log::warn!("Graceful shutdown timed out, forcing exit");
        std::process::exit(1);
    });
}
