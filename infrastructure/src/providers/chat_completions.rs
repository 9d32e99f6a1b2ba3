//! Shared HTTP plumbing for OpenAI-style chat-completions endpoints
//!
//! Both built-in providers POST `{messages: [{role, content}], ...}` and get
//! back a `choices[0].message.content` document. Only the URL, the auth
//! header and the sampling parameters differ.

use std::time::Duration;

use hostagent_application::GatewayError;
use hostagent_domain::{Message, UNPARSABLE_RESPONSE, util::truncate_str};
use serde_json::{Value, json};
use tracing::debug;

/// Longest error body kept in a [`GatewayError::HttpStatus`]
const MAX_ERROR_BODY: usize = 2000;

/// How the API key is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuth {
    /// `Authorization: Bearer <key>`
    Bearer(String),
    /// `api-key: <key>`
    ApiKeyHeader(String),
}

pub struct ChatCompletionsClient {
    http: reqwest::Client,
    url: String,
    auth: ApiAuth,
    timeout: Duration,
}

impl ChatCompletionsClient {
    pub fn new(
        url: impl Into<String>,
        auth: ApiAuth,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http,
            url: url.into(),
            auth,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the request body and return the raw 2xx response text
    pub async fn post(&self, body: &Value) -> Result<String, GatewayError> {
        let request = self.http.post(&self.url).json(body);
        let request = match &self.auth {
            ApiAuth::Bearer(key) => request.bearer_auth(key),
            ApiAuth::ApiKeyHeader(key) => request.header("api-key", key),
        };

        debug!("POST {}", self.url);
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body: truncate_str(&text, MAX_ERROR_BODY).to_string(),
                hint: status_hint(status.as_u16()).map(str::to_string),
            });
        }

        if let Err(e) = serde_json::from_str::<Value>(&text) {
            return Err(GatewayError::MalformedResponse(format!(
                "response is not JSON: {}",
                e
            )));
        }

        Ok(text)
    }

    fn map_send_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(format!("{} after {}s", self.url, self.timeout.as_secs()))
        } else {
            GatewayError::Connection(e.to_string())
        }
    }
}

/// Explanation for status codes whose cause is usually configuration
pub fn status_hint(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("check request parameters: model or deployment name, API version, max_tokens"),
        401 => Some("API key is invalid or expired"),
        403 => Some("API key lacks access to this resource"),
        404 => Some("check the endpoint URL and deployment name"),
        429 => Some("rate limited; retry later"),
        503 => Some("service temporarily unavailable"),
        _ => None,
    }
}

/// `[{role, content}, ...]` in history order
pub fn messages_json(messages: &[Message]) -> Value {
    Value::Array(
        messages
            .iter()
            .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
            .collect(),
    )
}

/// `choices[0].message.content`, or the fixed fallback text
pub fn extract_content(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| {
            v.pointer("/choices/0/message/content")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNPARSABLE_RESPONSE.to_string())
}
