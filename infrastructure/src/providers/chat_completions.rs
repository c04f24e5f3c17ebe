//! OpenAI-compatible chat completions gateway
//!
//! Every supported provider speaks the same wire format:
//!
//! ```text
//! POST {base_url}/v1/chat/completions
//! Authorization: Bearer <key>            (when a key is configured)
//! {"model": "...", "messages": [...], "temperature": 0.7, "max_tokens": ...}
//!
//! 200 {"choices": [{"message": {"content": "..."}}], ...}
//! ```
//!
//! Requests are adapted to the model's quirks before they are encoded, so
//! callers can always send a system prompt and a temperature.

use async_trait::async_trait;
use debate_application::ports::llm_gateway::{GatewayError, LlmGateway};
use debate_domain::{ChatMessage, ChatRequest, Model, ProviderKind};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request body for `/chat/completions`.
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: Option<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gateway bound to one model on one OpenAI-compatible endpoint.
pub struct ChatCompletionsGateway {
    kind: ProviderKind,
    model: Model,
    url: String,
    api_key: Option<String>,
    client: Client,
}

impl ChatCompletionsGateway {
    pub fn new(
        kind: ProviderKind,
        model: Model,
        base_url: &str,
        api_key: Option<String>,
        client: Client,
    ) -> Self {
        Self {
            kind,
            model,
            url: completions_url(base_url),
            api_key,
            client,
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Endpoint for a base URL, tolerating a trailing `/` or `/v1`.
pub fn completions_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

/// JSON body for `request`, after adapting it to `model`.
pub fn encode_request(model: &Model, request: &ChatRequest) -> serde_json::Value {
    let adapted = request.adapted_for(model);
    let body = ApiRequest {
        model: model.as_str(),
        messages: &adapted.messages,
        temperature: adapted.options.temperature,
        max_tokens: adapted.options.max_tokens,
    };
    serde_json::to_value(&body).unwrap_or(serde_json::Value::Null)
}

/// Text of the first choice of a successful response.
pub fn decode_response(body: &str) -> Result<String, GatewayError> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("malformed JSON: {e}")))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(GatewayError::InvalidResponse(
            "response contained no message content".to_string(),
        ));
    }
    Ok(content)
}

/// Map a non-success status and its body to a gateway error.
pub fn decode_error(status: StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), detail)),
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionsGateway {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        let body = encode_request(&self.model, request);
        debug!(
            "POST {} ({}, model {}, {} chars)",
            self.url,
            self.kind,
            self.model,
            request.content_len()
        );

        let mut http_request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            warn!("{} returned HTTP {}", self.kind, status.as_u16());
            return Err(decode_error(status, &text));
        }
        decode_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::GenerationOptions;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a loopback port and return the
    /// base URL plus a handle yielding the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://api.openai.com"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("https://api.deepseek.com/v1/"),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:11434/"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_encode_keeps_system_and_temperature() {
        let request = ChatRequest::from_prompt("Hi", Some("Be brief."), GenerationOptions::default());
        let body = encode_request(&Model::Gpt4o, &request);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hi");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_encode_folds_system_for_o1_mini() {
        let request = ChatRequest::from_prompt("Hi", Some("Be brief."), GenerationOptions::default());
        let body = encode_request(&Model::O1Mini, &request);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(
            messages[0]["content"],
            "[System instructions: Be brief.]\n\nHi"
        );
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_encode_omits_temperature_for_o3_mini() {
        let options = GenerationOptions::default().with_max_tokens(256);
        let body = encode_request(&Model::O3Mini, &ChatRequest::from_prompt("Hi", None, options));
        assert!(body.get("temperature").is_none());
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_decode_response() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Revenue was $10M."}}]}"#;
        assert_eq!(decode_response(body).unwrap(), "Revenue was $10M.");
    }

    #[test]
    fn test_decode_empty_content_is_invalid() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
            "not json",
        ] {
            assert!(
                matches!(decode_response(body), Err(GatewayError::InvalidResponse(_))),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_decode_error() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            decode_error(StatusCode::UNAUTHORIZED, body),
            GatewayError::RequestFailed("HTTP 401: Incorrect API key provided".to_string())
        );
        assert_eq!(
            decode_error(StatusCode::NOT_FOUND, "no such model"),
            GatewayError::ModelNotAvailable("no such model".to_string())
        );
        assert_eq!(decode_error(StatusCode::GATEWAY_TIMEOUT, ""), GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_chat_round_trip_over_http() {
        let body = r#"{"choices":[{"message":{"content":"Revenue was $10M."}}]}"#;
        let (base_url, server) = serve_once("200 OK", body).await;
        let gateway = ChatCompletionsGateway::new(
            ProviderKind::OpenAi,
            Model::Gpt4o,
            &base_url,
            Some("sk-test".to_string()),
            Client::new(),
        );

        let request =
            ChatRequest::from_prompt("What was revenue?", None, GenerationOptions::default());
        let reply = gateway.chat(&request).await.unwrap();
        assert_eq!(reply, "Revenue was $10M.");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains(r#""model":"gpt-4o""#));
    }

    #[tokio::test]
    async fn test_chat_maps_http_error() {
        let (base_url, server) =
            serve_once("404 Not Found", r#"{"error":{"message":"model not found"}}"#).await;
        let gateway = ChatCompletionsGateway::new(
            ProviderKind::Local,
            Model::from("llama3:8b"),
            &base_url,
            None,
            Client::new(),
        );

        let err = gateway
            .chat(&ChatRequest::from_prompt("Hi", None, GenerationOptions::default()))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::ModelNotAvailable("model not found".to_string()));

        let raw = server.await.unwrap();
        assert!(!raw.to_lowercase().contains("authorization:"));
    }
}
