//! # Whisper API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        "Starting Whisper API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config)
        .await
        .context("failed to build application state")?;

    #[cfg(feature = "rate-limit")]
    let limiter: std::sync::Arc<dyn whisper_core::ports::RateLimiter> = std::sync::Arc::new(
        whisper_infra::InMemoryRateLimiter::new(&config.rate_limit)?,
    );
    #[cfg(feature = "rate-limit")]
    let trust_proxy_headers = config.rate_limit.trust_proxy_headers;

    HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes);

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(
            middleware::rate_limit::RateLimitMiddleware::new(limiter.clone())
                .trust_proxy_headers(trust_proxy_headers),
        );

        // The last `wrap` is the outermost layer.
        app.wrap(RequestIdMiddleware).wrap(TracingLogger::default())
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
