use std::env;

use naming_core::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    tracing::info!("Starting name generator web service...");

    let config = Config::new();
    if config.api_key.is_none() {
        // No embedded default credential: refuse to start without a key.
        tracing::error!(
            "No API key configured. Set DEEPSEEK_API_KEY or api_key in config.toml and restart."
        );
        std::process::exit(1);
    }

    let port = env::var("APP_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    if let Err(e) = web_service::server::run(config, port).await {
        tracing::error!("Failed to run web service: {}", e);
        std::process::exit(1);
    }
}
