//! GatewayClient -- streaming proxy to the upstream chat-completion API.
//!
//! Issues exactly one outbound request per exchange with the composed
//! system prompt prepended to the caller's history, and relays the
//! response body as an opaque forward-only byte stream. The client never
//! parses SSE frames itself: once the status check passes it is a pure
//! pass-through, and frame decoding belongs to the consumer.
//!
//! Upstream status handling: 429 and 402 map to their distinct error
//! kinds; any other non-success status is logged with its body and
//! surfaced as a generic upstream failure. No retries are performed here.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and only exposed
//! when constructing the Authorization header.

use std::pin::Pin;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use secrecy::{ExposeSecret, SecretString};

use silk_core::agent::intent::classify;
use silk_core::agent::prompt::compose_prompt;
use silk_types::gateway::{ChatCompletionRequest, GatewayError};
use silk_types::message::ChatMessage;

use super::config::GatewayConfig;

/// Streaming client for the upstream chat-completion gateway.
pub struct GatewayClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GatewayClient {
    /// Create a client from a loaded configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            // Bounding timeout on the whole exchange, including streaming.
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url,
            model: config.model,
        }
    }

    /// The model requested from the gateway.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the outbound request: stage prompt first, then the history.
    ///
    /// The intent is derived from the latest message of the history, and
    /// the composed prompt travels as the lone leading system message.
    fn build_request(&self, history: &[ChatMessage]) -> ChatCompletionRequest {
        let latest = history.last().map(|m| m.content.as_str()).unwrap_or("");
        let intent = classify(latest);
        tracing::debug!(intent = %intent, "classified conversation stage");

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(compose_prompt(intent)));
        messages.extend_from_slice(history);

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            stream: true,
        }
    }

    /// Open a streamed completion for the given history.
    ///
    /// On success, returns the raw response body as a byte stream; read
    /// failures inside the stream surface as [`GatewayError::Transport`].
    pub async fn stream_reply(
        &self,
        history: &[ChatMessage],
    ) -> Result<Pin<Box<dyn Stream<Item = Result<Vec<u8>, GatewayError>> + Send + 'static>>, GatewayError>
    {
        let request = self.build_request(history);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), body));
        }

        Ok(Box::pin(response.bytes_stream().map(|result| {
            result
                .map(|chunk| chunk.to_vec())
                .map_err(|e| GatewayError::Transport(format!("response body read: {e}")))
        })))
    }
}

/// Map a non-success upstream status to exactly one error kind.
fn classify_status(status: u16, body: String) -> GatewayError {
    match status {
        429 => GatewayError::RateLimited,
        402 => GatewayError::QuotaExceeded,
        _ => {
            tracing::warn!(status, body = %body, "AI gateway error response");
            GatewayError::Upstream { status, body }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silk_types::message::MessageRole;

    fn make_client() -> GatewayClient {
        GatewayClient::new(GatewayConfig {
            api_key: SecretString::from("test-key-not-real"),
            base_url: "https://gateway.test/v1".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
        })
    }

    #[test]
    fn test_url_construction() {
        let client = make_client().with_base_url("http://localhost:8080/v1".to_string());
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_build_request_prepends_system_prompt() {
        let client = make_client();
        let history = vec![
            ChatMessage::assistant("Welcome!"),
            ChatMessage::user("I need a loan"),
        ];

        let request = client.build_request(&history);

        assert!(request.stream);
        assert_eq!(request.model, "google/gemini-2.5-flash");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, MessageRole::System);
        // Loan keywords in the latest message select the discovery stage.
        assert!(request.messages[0].content.contains("NEEDS DISCOVERY"));
        assert_eq!(request.messages[1].content, "Welcome!");
        assert_eq!(request.messages[2].content, "I need a loan");
    }

    #[test]
    fn test_build_request_with_empty_history_uses_general_stage() {
        let client = make_client();
        let request = client.build_request(&[]);
        assert_eq!(request.messages.len(), 1);
        assert!(request.messages[0].content.contains("ENGAGEMENT"));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(429, String::new()),
            GatewayError::RateLimited
        ));
        assert!(matches!(
            classify_status(402, String::new()),
            GatewayError::QuotaExceeded
        ));
        assert!(matches!(
            classify_status(503, "overloaded".to_string()),
            GatewayError::Upstream { status: 503, .. }
        ));
        assert!(matches!(
            classify_status(400, String::new()),
            GatewayError::Upstream { status: 400, .. }
        ));
    }
}
