//! # Wall Server
//!
//! Server-rendered social wall: profile sidebar, post composer and feed.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod views;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::LogFormat;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(LogFormat::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting wall server on {}:{}", config.host, config.port);

    let state = AppState::new(&config);

    // Initial load runs in the background; the page shows skeletons until it finishes.
    let wall = state.wall.clone();
    actix_web::rt::spawn(async move { wall.load().await });

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
