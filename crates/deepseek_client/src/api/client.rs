use anyhow::{anyhow, bail};
use async_trait::async_trait;
use log::{error, info};
use naming_core::Config;
use reqwest::{header::HeaderMap, Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

use crate::api::models::ChatCompletionRequest;
use crate::client_trait::ChatCompletionClient;

/// Single bounded retry before the caller declares the upstream unavailable.
const MAX_RETRIES: u32 = 1;

#[derive(Debug)]
pub struct DeepSeekClient {
    client: ClientWithMiddleware,
    api_key: String,
    api_base: String,
    default_model: String,
}

impl DeepSeekClient {
    /// Fails when no API key is configured. There is no embedded default
    /// credential; startup is the right place to find that out.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => bail!("no API key configured: set DEEPSEEK_API_KEY or api_key in config.toml"),
        };

        let client = Self::build_http_client(config)?;
        let retry_client = Self::build_retry_client(client);

        Ok(DeepSeekClient {
            client: retry_client,
            api_key,
            api_base: config.api_base().to_string(),
            default_model: config.model().to_string(),
        })
    }

    fn build_http_client(config: &Config) -> anyhow::Result<Client> {
        Client::builder()
            .default_headers(Self::get_default_headers())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))
    }

    fn build_retry_client(client: Client) -> ClientWithMiddleware {
        // Default retry bounds already start at a 1s base interval.
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES);

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn get_default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("accept", "application/json".parse().unwrap());
        headers.insert("content-type", "application/json".parse().unwrap());
        headers
    }
}

#[async_trait]
impl ChatCompletionClient for DeepSeekClient {
    async fn send_chat_completion_request(
        &self,
        mut request: ChatCompletionRequest,
    ) -> anyhow::Result<Response> {
        if request.model.is_empty() {
            request.model = self.default_model.clone();
        }

        let url = format!("{}/chat/completions", self.api_base);
        info!(
            "Sending chat completion request to {} with {} messages",
            url,
            request.messages.len()
        );

        self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send chat completion request: {}", e);
                anyhow!("Failed to send chat completion request: {}", e)
            })
    }
}
