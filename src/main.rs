mod config;
mod error;
mod genai;
mod handle;
mod pages;
mod pdf;
mod routes;
mod services;
mod session;
mod state;
mod supabase;
mod views;

use error::ErrorCode;

#[tokio::main]
async fn main() {
    // A missing .env is fine; the process environment may carry everything.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Auth credentials are required; nothing renders without them.
    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "configuration invalid");
            std::process::exit(1);
        }
    };

    let port = config.server.port;
    let state = state::AppState::from_config(&config);
    let app = routes::app(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "guru dashboard listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
