use actix_web::{post, web, HttpResponse};
use uuid::Uuid;

use crate::{dto::GenerateNamesRequest, error::AppError, server::AppState, services::name_service};

/// Generate name candidates. Input errors are the only hard failure here;
/// everything downstream resolves to a 200 with the fallback payload.
#[post("/names/generate")]
pub async fn generate_names(
    app_state: web::Data<AppState>,
    req: web::Json<GenerateNamesRequest>,
) -> Result<HttpResponse, AppError> {
    let request = req.into_inner().into_domain()?;

    let request_id = Uuid::new_v4();
    log::info!(
        "[{request_id}] Generating names for {:?} with {} traits",
        request.gender,
        request.traits.len()
    );

    let response =
        name_service::generate_names(app_state.llm_client.as_ref(), &app_state.model, &request)
            .await;

    if let Some(error) = &response.error {
        log::warn!("[{request_id}] Served fallback list: {error}");
    }

    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_names);
}
