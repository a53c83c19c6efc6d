use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    test, App, Error,
};
use async_trait::async_trait;
use deepseek_client::api::models::ChatCompletionRequest;
use deepseek_client::ChatCompletionClient;
use naming_core::{fallback_names, NameResponse};
use std::sync::Arc;
use web_service::server::{app_config, page_config, AppState};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

struct MockChatClient {
    mock_server_uri: String,
    client: reqwest::Client,
}

#[async_trait]
impl ChatCompletionClient for MockChatClient {
    async fn send_chat_completion_request(
        &self,
        request: ChatCompletionRequest,
    ) -> anyhow::Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.mock_server_uri);
        let res = self.client.post(&url).json(&request).send().await?;
        Ok(res)
    }
}

async fn setup_test_environment() -> (
    impl Service<Request, Response = ServiceResponse, Error = Error>,
    MockServer,
) {
    let mock_server = MockServer::start().await;

    let llm_client = Arc::new(MockChatClient {
        mock_server_uri: mock_server.uri(),
        client: reqwest::Client::builder().no_proxy().build().unwrap(),
    });

    let app_state = actix_web::web::Data::new(AppState {
        llm_client,
        model: "deepseek-chat".to_string(),
    });

    let app = test::init_service(
        App::new()
            .app_data(app_state.clone())
            .configure(app_config)
            .configure(page_config),
    )
    .await;
    (app, mock_server)
}

/// Wrap generated text in a chat-completion envelope.
fn completion_with_content(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "cmpl-test",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200 }
    })
}

fn valid_request_body() -> serde_json::Value {
    serde_json::json!({
        "gender": "female",
        "originalName": "Sarah",
        "traits": ["kind", "creative"]
    })
}

async fn mount_completion(mock_server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_with_content(content)))
        .mount(mock_server)
        .await;
}

#[actix_web::test]
async fn healthy_upstream_names_pass_through_unmodified() {
    let (app, mock_server) = setup_test_environment().await;

    let content = r#"[
        {"name": "凯文", "pinyin": "Kǎi Wén", "meaning": "凯旋而归，文采斐然"},
        {"name": "雅婷", "pinyin": "Yǎ Tíng", "meaning": "优雅亭亭"},
        {"name": "明轩", "pinyin": "Míng Xuān", "meaning": "明亮轩昂"},
        {"name": "心怡", "pinyin": "Xīn Yí", "meaning": "心旷神怡"}
    ]"#;
    mount_completion(&mock_server, content).await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(valid_request_body())
        .to_request();
    let resp: NameResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.names.len(), 4);
    assert_eq!(resp.names[0].name, "凯文");
    assert_eq!(resp.names[3].name, "心怡");
    assert!(!resp.fallback);
    assert!(resp.error.is_none());
    assert_eq!(resp.usage.unwrap().total_tokens, 200);
}

#[actix_web::test]
async fn six_candidates_truncate_to_first_four() {
    let (app, mock_server) = setup_test_environment().await;

    let items: Vec<String> = (1..=6)
        .map(|i| format!(r#"{{"name": "名{i}", "pinyin": "ming{i}", "meaning": "寓意{i}"}}"#))
        .collect();
    mount_completion(&mock_server, &format!("[{}]", items.join(","))).await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(valid_request_body())
        .to_request();
    let resp: NameResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.names.len(), 4);
    let names: Vec<&str> = resp.names.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["名1", "名2", "名3", "名4"]);
    assert!(!resp.fallback);
}

#[actix_web::test]
async fn array_wrapped_in_prose_is_still_parsed() {
    let (app, mock_server) = setup_test_environment().await;

    let content = concat!(
        "好的，这是为您起的名字：\n",
        r#"[{"name": "安然", "pinyin": "Ān Rán", "meaning": "平安顺遂"}]"#,
        "\n希望您喜欢！"
    );
    mount_completion(&mock_server, content).await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(valid_request_body())
        .to_request();
    let resp: NameResponse = test::call_and_read_body_json(&app, req).await;

    assert!(!resp.fallback);
    assert_eq!(resp.names[0].name, "安然");
}

#[actix_web::test]
async fn upstream_error_status_serves_backup_list() {
    let (app, mock_server) = setup_test_environment().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error": "overloaded"}"#))
        .mount(&mock_server)
        .await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(valid_request_body())
        .to_request();
    let resp: NameResponse = test::call_and_read_body_json(&app, req).await;

    assert!(resp.fallback);
    assert_eq!(resp.names, fallback_names());
    assert!(resp.error.is_some());
}

#[actix_web::test]
async fn unparseable_content_serves_backup_list() {
    let (app, mock_server) = setup_test_environment().await;

    mount_completion(&mock_server, "很抱歉，我现在无法为您起名。").await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(valid_request_body())
        .to_request();
    let resp: NameResponse = test::call_and_read_body_json(&app, req).await;

    assert!(resp.fallback);
    assert_eq!(resp.names, fallback_names());
}

#[actix_web::test]
async fn all_candidates_invalid_serves_backup_list() {
    let (app, mock_server) = setup_test_environment().await;

    mount_completion(
        &mock_server,
        r#"[{"name": ""}, {"pinyin": "only"}, {"meaning": "  "}]"#,
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(valid_request_body())
        .to_request();
    let resp: NameResponse = test::call_and_read_body_json(&app, req).await;

    assert!(resp.fallback);
    assert_eq!(resp.names, fallback_names());
    assert!(resp
        .error
        .as_deref()
        .unwrap()
        .contains("field validation"));
}

#[actix_web::test]
async fn missing_gender_is_a_400() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(serde_json::json!({
            "originalName": "Sarah",
            "traits": ["kind"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.get("error").is_some());
    assert!(body.get("names").is_none());
}

#[actix_web::test]
async fn empty_traits_is_a_400() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::post()
        .uri("/v1/names/generate")
        .set_json(serde_json::json!({
            "gender": "male",
            "originalName": "John",
            "traits": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::get().uri("/v1/health").to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["status"], "ok");
}

#[actix_web::test]
async fn page_shell_embeds_shared_fallback_list() {
    let (app, _mock_server) = setup_test_environment().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(!html.contains("__FALLBACK_NAMES__"));
    for candidate in fallback_names() {
        assert!(html.contains(&candidate.name), "missing {}", candidate.name);
    }
}
