//! The name request handler: prompt construction, completion-service call,
//! two-stage response parsing, field validation, and fallback substitution.
//!
//! The contract is availability over correctness: every downstream failure
//! resolves to the fixed backup list with `fallback: true`, never to an
//! error status.

use deepseek_client::api::models::{ChatCompletionRequest, ChatCompletionResponse, Message};
use deepseek_client::ChatCompletionClient;
use lazy_static::lazy_static;
use log::{info, warn};
use naming_core::{fallback_names, NameCandidate, NameRequest, NameResponse, Usage};
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

const MAX_CANDIDATES: usize = 4;

/// Why a generation attempt fell back. Each parsing stage fails by name so
/// logs show exactly where malformed output died.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("completion response envelope could not be decoded: {0}")]
    MalformedEnvelope(String),

    #[error("completion output is not a JSON array and contains no bracketed array")]
    NoJsonArrayFound,

    #[error("bracketed text extracted from completion output is not a valid JSON array: {0}")]
    ExtractedArrayInvalid(String),

    #[error("no candidate passed field validation")]
    NoValidCandidates,
}

/// Handle one name request end to end. Never fails: any downstream error is
/// absorbed into a degraded response carrying the fixed backup list.
pub async fn generate_names(
    client: &dyn ChatCompletionClient,
    model: &str,
    request: &NameRequest,
) -> NameResponse {
    match try_generate(client, model, request).await {
        Ok((names, usage)) => {
            info!("Generated {} name candidates", names.len());
            NameResponse::generated(names, usage)
        }
        Err(e) => {
            warn!("Name generation failed, serving backup list: {e}");
            NameResponse::degraded(fallback_names(), e.to_string())
        }
    }
}

async fn try_generate(
    client: &dyn ChatCompletionClient,
    model: &str,
    request: &NameRequest,
) -> Result<(Vec<NameCandidate>, Option<Usage>), GenerationError> {
    let completion_request = ChatCompletionRequest::new(
        model.to_string(),
        vec![
            Message::system(SYSTEM_PROMPT.to_string()),
            Message::user(build_prompt(request)),
        ],
    );

    let response = client
        .send_chat_completion_request(completion_request)
        .await
        .map_err(|e| GenerationError::UpstreamUnavailable(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GenerationError::UpstreamUnavailable(e.to_string()))?;

    if !status.is_success() {
        return Err(GenerationError::UpstreamUnavailable(format!(
            "HTTP {status}: {body}"
        )));
    }

    let completion: ChatCompletionResponse = serde_json::from_str(&body)
        .map_err(|e| GenerationError::MalformedEnvelope(e.to_string()))?;

    let content = completion.first_content().unwrap_or_default();
    let candidates = parse_candidates(content)?;

    Ok((candidates, completion.usage))
}

const SYSTEM_PROMPT: &str = "你是一位专业的中文起名专家，擅长为外国朋友起富有文化内涵的中文名字。";

/// Compose the user prompt. The instruction pins the output to a bare JSON
/// array because the parser assumes the reply is either pure JSON or JSON
/// embedded in surrounding text.
fn build_prompt(request: &NameRequest) -> String {
    format!(
        "请为一位{gender}外国朋友起4个中文名字。\n\
         原名：{original_name}\n\
         个人特点：{traits}\n\n\
         要求：\n\
         1. 名字要体现上述个人特点，寓意美好\n\
         2. 使用常见汉字，避免生僻字\n\
         3. 严格按照以下JSON数组格式输出，不要输出数组以外的任何文字：\n\
         [{{\"name\": \"名字\", \"pinyin\": \"拼音\", \"meaning\": \"寓意说明\"}}]\n\
         4. 数组必须恰好包含4个对象，每个对象都有name、pinyin、meaning三个字段",
        gender = request.gender.prompt_label(),
        original_name = request.original_name,
        traits = request.traits.join("、"),
    )
}

lazy_static! {
    // Greedy: spans from the first '[' to the last ']' so prose around the
    // array is stripped in one pass.
    static ref JSON_ARRAY_RE: Regex = Regex::new(r"\[[\s\S]*\]").unwrap();
}

/// Two-stage extraction: direct parse of the whole text, then a greedy
/// bracket scan. Survivors are field-validated and truncated to four.
fn parse_candidates(content: &str) -> Result<Vec<NameCandidate>, GenerationError> {
    let items = extract_json_array(content)?;

    let mut candidates: Vec<NameCandidate> =
        items.iter().filter_map(candidate_from_value).collect();
    if candidates.is_empty() {
        return Err(GenerationError::NoValidCandidates);
    }
    candidates.truncate(MAX_CANDIDATES);
    Ok(candidates)
}

fn extract_json_array(content: &str) -> Result<Vec<Value>, GenerationError> {
    // Stage 1: the whole reply is the array.
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(content.trim()) {
        return Ok(items);
    }

    // Stage 2: the array is embedded in surrounding prose.
    let matched = JSON_ARRAY_RE
        .find(content)
        .ok_or(GenerationError::NoJsonArrayFound)?;
    match serde_json::from_str::<Value>(matched.as_str()) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(GenerationError::ExtractedArrayInvalid(
            "bracketed text is valid JSON but not an array".to_string(),
        )),
        Err(e) => Err(GenerationError::ExtractedArrayInvalid(e.to_string())),
    }
}

/// A candidate survives only when all three fields are non-empty strings
/// after trimming. Broken elements are dropped, not repaired.
fn candidate_from_value(value: &Value) -> Option<NameCandidate> {
    let field = |key: &str| -> Option<String> {
        let text = value.get(key)?.as_str()?.trim();
        (!text.is_empty()).then(|| text.to_string())
    };
    Some(NameCandidate {
        name: field("name")?,
        pinyin: field("pinyin")?,
        meaning: field("meaning")?,
    })
}
