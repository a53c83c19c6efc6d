use async_trait::async_trait;
use reqwest::Response;

use crate::api::models::ChatCompletionRequest;

/// Seam between the web layer and the completion backend. The web layer only
/// ever sees this trait, so tests can substitute a mock pointed at a local
/// server.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send one non-streaming chat-completion request and return the raw
    /// response. Status checking and body parsing are the caller's job.
    async fn send_chat_completion_request(
        &self,
        request: ChatCompletionRequest,
    ) -> anyhow::Result<Response>;
}
