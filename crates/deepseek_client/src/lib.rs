pub mod api;
pub mod client_trait;

pub use api::client::DeepSeekClient;
pub use client_trait::ChatCompletionClient;
