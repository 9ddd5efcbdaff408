// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for Scribe.
//!
//! This crate implements [`ProviderAdapter`] for the Anthropic Messages API.
//! Drafting is single-turn, so only non-streaming completion is supported.

pub mod client;
pub mod types;

use async_trait::async_trait;
use scribe_config::model::AnthropicConfig;
use scribe_core::ScribeError;
use scribe_core::traits::{PluginAdapter, ProviderAdapter};
use scribe_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from the given configuration.
    pub fn new(config: &AnthropicConfig) -> Result<Self, ScribeError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = AnthropicClient::new(&api_key, &config.api_version)?;

        info!(model = config.model.as_str(), "Anthropic provider initialized");
        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }
}

/// Converts a [`ProviderRequest`] to a single-turn Anthropic [`MessageRequest`].
fn to_message_request(request: &ProviderRequest) -> MessageRequest {
    MessageRequest {
        model: request.model.clone(),
        messages: vec![ApiMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        }],
        system: (!request.system.is_empty()).then(|| request.system.clone()),
        max_tokens: request.max_tokens,
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ScribeError> {
        // A real call would consume tokens; construction already validated the headers.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ScribeError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ScribeError> {
        let api_request = to_message_request(&request);
        let response = self.client.complete_message(&api_request).await?;

        Ok(ProviderResponse {
            content: response.text(),
            id: response.id,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: Option<&str>) -> Result<String, ScribeError> {
    if let Some(key) = config_key.filter(|key| !key.is_empty()) {
        return Ok(key.to_string());
    }

    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        ScribeError::Config(
            "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "claude-sonnet-4-20250514".into(),
            system: "You are scribe.".into(),
            prompt: "Conversation: ...".into(),
            max_tokens: 512,
        }
    }

    #[test]
    fn resolve_api_key_from_config() {
        assert_eq!(resolve_api_key(Some("sk-ant-test")).unwrap(), "sk-ant-test");
    }

    #[test]
    fn provider_request_maps_to_single_user_turn() {
        let api = to_message_request(&request());
        assert_eq!(api.messages.len(), 1);
        assert_eq!(api.messages[0].role, "user");
        assert_eq!(api.messages[0].content, "Conversation: ...");
        assert_eq!(api.system.as_deref(), Some("You are scribe."));
        assert_eq!(api.max_tokens, 512);
    }

    #[test]
    fn empty_system_is_omitted() {
        let mut req = request();
        req.system.clear();
        assert!(to_message_request(&req).system.is_none());
    }

    #[test]
    fn adapter_identity() {
        let provider = AnthropicProvider::new(&AnthropicConfig {
            api_key: Some("sk-ant-test".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }

    #[tokio::test]
    async fn complete_returns_text_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "system": "You are scribe.",
                "max_tokens": 512
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "Use a Postfix."}],
                "model": "claude-sonnet-4-20250514",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 40, "output_tokens": 6}
            })))
            .mount(&server)
            .await;

        let client = AnthropicClient::new("sk-ant-test", "2023-06-01")
            .unwrap()
            .with_base_url(server.uri());
        let provider = AnthropicProvider::with_client(client);

        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "Use a Postfix.");
        assert_eq!(response.id, "msg_1");
        assert_eq!(response.usage.input_tokens, 40);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }
}
