use actix_web::{get, web, HttpResponse};
use naming_core::fallback_names;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const FALLBACK_PLACEHOLDER: &str = "__FALLBACK_NAMES__";

/// Serve the page shell with the shared backup list injected server-side,
/// so the client's total-transport-failure path uses the same constant as
/// the server fallback instead of a copy-pasted literal.
#[get("/")]
pub async fn index() -> HttpResponse {
    let fallback_json =
        serde_json::to_string(&fallback_names()).unwrap_or_else(|_| "[]".to_string());
    let page = INDEX_HTML.replace(FALLBACK_PLACEHOLDER, &fallback_json);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
