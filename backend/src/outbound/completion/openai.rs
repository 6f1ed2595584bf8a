//! Reqwest-backed chat-completion adapter.
//!
//! Sends one user message per topic to `{base_url}/chat/completions` and
//! returns the first choice. Transport details stay here; callers only see
//! [`CompletionSourceError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{ChatRequestDto, ChatResponseDto};
use crate::domain::ports::{CompletionSource, CompletionSourceError};

/// Endpoint, credentials and model for [`OpenAiCompletionSource`].
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

/// Chat-completion source talking to an OpenAI-compatible API.
pub struct OpenAiCompletionSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiCompletionSource {
    /// Build the adapter with a client bounded by `settings.timeout`.
    ///
    /// # Errors
    ///
    /// Fails when the base URL cannot be extended with the endpoint path or
    /// the reqwest client cannot be constructed.
    pub fn new(settings: OpenAiSettings) -> Result<Self, CompletionSourceError> {
        let endpoint = chat_endpoint(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| CompletionSourceError::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key,
            model: settings.model,
        })
    }
}

fn chat_endpoint(base_url: &Url) -> Result<Url, CompletionSourceError> {
    let mut endpoint = base_url.clone();
    endpoint
        .path_segments_mut()
        .map_err(|()| CompletionSourceError::unavailable("base URL cannot carry a path"))?
        .pop_if_empty()
        .extend(["chat", "completions"]);
    Ok(endpoint)
}

#[async_trait]
impl CompletionSource for OpenAiCompletionSource {
    async fn complete(&self, topic: &str) -> Result<String, CompletionSourceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&ChatRequestDto::for_topic(&self.model, topic))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_reply(body.as_ref())
    }
}

fn parse_reply(body: &[u8]) -> Result<String, CompletionSourceError> {
    let decoded: ChatResponseDto = serde_json::from_slice(body).map_err(|err| {
        CompletionSourceError::decode(format!("invalid completion payload: {err}"))
    })?;
    decoded
        .into_first_reply()
        .ok_or_else(|| CompletionSourceError::decode("completion returned no choices"))
}

fn map_transport_error(error: reqwest::Error) -> CompletionSourceError {
    CompletionSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionSourceError {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    CompletionSourceError::status(status.as_u16(), preview)
}

#[cfg(test)]
mod tests {
    //! Non-network coverage; the request path is exercised against a local
    //! stub server in `tests/completion_proxy.rs`.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.openai.com/v1", "https://api.openai.com/v1/chat/completions")]
    #[case("https://api.openai.com/v1/", "https://api.openai.com/v1/chat/completions")]
    #[case("http://127.0.0.1:8080", "http://127.0.0.1:8080/chat/completions")]
    fn endpoint_appends_chat_completions(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base URL");

        let endpoint = chat_endpoint(&base).expect("endpoint builds");

        assert_eq!(endpoint.as_str(), expected);
    }

    #[test]
    fn request_carries_single_user_message() {
        let value = serde_json::to_value(ChatRequestDto::for_topic("gpt-4", "rust"))
            .expect("serialise request");

        assert_eq!(
            value,
            serde_json::json!({
                "model": "gpt-4",
                "messages": [{ "role": "user", "content": "rust" }],
            })
        );
    }

    #[test]
    fn parse_reply_takes_first_choice() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"content":"second"}}]}"#;

        assert_eq!(parse_reply(body).expect("reply decodes"), "first");
    }

    #[rstest]
    #[case(br#"{"choices":[]}"#.as_slice())]
    #[case(b"not json".as_slice())]
    fn parse_reply_rejects_unusable_payloads(#[case] body: &[u8]) {
        let err = parse_reply(body).expect_err("payload is unusable");

        assert!(matches!(err, CompletionSourceError::Decode { .. }));
    }

    #[test]
    fn status_error_keeps_code_and_compacts_body() {
        let err = map_status_error(
            StatusCode::TOO_MANY_REQUESTS,
            b"{\n  \"error\": \"rate limited\"\n}",
        );

        assert_eq!(
            err,
            CompletionSourceError::status(429_u16, "{ \"error\": \"rate limited\" }")
        );
    }
}
