use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use deepseek_client::{ChatCompletionClient, DeepSeekClient};
use log::{error, info};
use naming_core::Config;

use crate::controllers::{name_controller, page_controller, system_controller};

pub struct AppState {
    pub llm_client: Arc<dyn ChatCompletionClient>,
    pub model: String,
}

const DEFAULT_WORKER_COUNT: usize = 4;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .configure(name_controller::config)
            .configure(system_controller::config),
    );
}

pub fn page_config(cfg: &mut web::ServiceConfig) {
    page_controller::config(cfg);
}

pub async fn run(config: Config, port: u16) -> Result<(), String> {
    info!("Starting web service...");

    let llm_client: Arc<dyn ChatCompletionClient> = Arc::new(
        DeepSeekClient::new(&config).map_err(|e| format!("Failed to build LLM client: {e}"))?,
    );

    let app_state = web::Data::new(AppState {
        llm_client,
        model: config.model().to_string(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
            .configure(page_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(format!("127.0.0.1:{port}"))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Web service listening on http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
