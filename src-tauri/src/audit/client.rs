//! Gemini client for audit generation.
//!
//! Exactly one `generateContent` request per audit: no retries, no timeout
//! beyond the transport default, no streaming.

use serde_json::Value;
use tracing::{error, info};
use url::Url;

use super::extraction::parse_audit_data;
use super::prompts::{build_audit_prompt, SEO_SYSTEM_INSTRUCTION};
use super::screenshot::screenshot_url;
use super::types::{AuditRequest, AuditResponse};
use crate::error::AuditError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Error bodies are truncated to this many characters in messages.
const ERROR_BODY_CHARS: usize = 1024;

/// Tunables for the audit call.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSettings {
    pub model: String,
    pub temperature: f32,
    /// Attach the Google Search tool so the model can look up live data
    pub search_grounding: bool,
    /// Base URL of the Gemini REST API
    pub endpoint: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            search_grounding: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl AuditSettings {
    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> Result<Url, AuditError> {
        let base = Url::parse(&self.endpoint).map_err(|e| {
            AuditError::Configuration(format!("Invalid Gemini endpoint '{}': {}", self.endpoint, e))
        })?;
        base.join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| {
                AuditError::Configuration(format!("Invalid Gemini model '{}': {}", self.model, e))
            })
    }
}

pub struct AuditClient {
    http: reqwest::Client,
    api_key: String,
    settings: AuditSettings,
}

impl AuditClient {
    /// Create a client. A missing or blank key fails here, before any request.
    pub fn new(api_key: Option<String>, settings: AuditSettings) -> Result<Self, AuditError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AuditError::Configuration(
                    "Kein Gemini API-Key konfiguriert. Bitte in den Einstellungen hinterlegen."
                        .to_string(),
                )
            })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AuditError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            settings,
        })
    }

    /// Generate an audit for `request`.
    pub async fn generate(&self, request: &AuditRequest) -> Result<AuditResponse, AuditError> {
        let target = request.url.trim();
        if target.is_empty() {
            return Err(AuditError::InvalidRequest("URL fehlt".to_string()));
        }

        info!(
            "Generating audit for '{}' using model '{}'",
            target, self.settings.model
        );

        let prompt = build_audit_prompt(request);
        let text = self.call_gemini(&prompt).await?;
        info!("Received {} chars of audit text", text.len());

        let data = parse_audit_data(&text)?;

        info!(
            "Audit for '{}' parsed: score={}, sections={}, tasks={}",
            data.domain,
            data.overall_score,
            data.sections.len(),
            data.total_tasks()
        );

        Ok(AuditResponse {
            data,
            screenshot_url: screenshot_url(target),
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = serde_json::json!({
            "systemInstruction": {
                "parts": [{"text": SEO_SYSTEM_INSTRUCTION}]
            },
            "contents": [
                {"role": "user", "parts": [{"text": prompt}]}
            ],
            "generationConfig": {
                "temperature": self.settings.temperature
            }
        });
        if self.settings.search_grounding {
            body["tools"] = serde_json::json!([{"google_search": {}}]);
        }
        body
    }

    async fn call_gemini(&self, prompt: &str) -> Result<String, AuditError> {
        let url = self.settings.generate_url()?;

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                let msg = format!("LLM API request failed for gemini: {}", e);
                error!("{}", msg);
                AuditError::Transport(msg)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AuditError::Transport(format!("Failed to read API response body from gemini: {}", e))
        })?;

        if !status.is_success() {
            let msg = format!(
                "LLM API error: {} from gemini - {}",
                status,
                service_error_message(&body)
            );
            error!("{}", msg);
            return Err(AuditError::Transport(msg));
        }

        let resp_json: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Gemini API response wrapper: {}", e);
            AuditError::malformed(body.clone())
        })?;

        if let Some(message) = resp_json["error"]["message"].as_str() {
            error!("Gemini returned an error object: {}", message);
            return Err(AuditError::Transport(message.to_string()));
        }

        Ok(response_text(&resp_json))
    }
}

/// Concatenate the text parts of the first candidate.
///
/// Grounded answers are often split across several parts.
pub fn response_text(resp_json: &Value) -> String {
    resp_json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Prefer the service's own error message, fall back to the truncated body.
fn service_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    if body.chars().count() > ERROR_BODY_CHARS {
        format!("{}...", body.chars().take(ERROR_BODY_CHARS).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve exactly one HTTP response on a local port and hand back the
    /// received request body.
    fn one_shot_server(status: &str, body: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();
            tx.send(String::from_utf8_lossy(&request_body).to_string()).unwrap();

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        (format!("http://{}/", addr), rx)
    }

    fn gemini_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        })
        .to_string()
    }

    fn client_for(endpoint: String) -> AuditClient {
        let settings = AuditSettings {
            endpoint,
            ..AuditSettings::default()
        };
        AuditClient::new(Some("test-key".to_string()), settings).unwrap()
    }

    const AUDIT_TEXT: &str = "```json\n{\"domain\":\"example.com\",\"overallScore\":62,\"executiveSummary\":[\"a\",\"b\",\"c\"],\"sections\":[]}\n```";

    #[test]
    fn test_missing_key_is_configuration_error() {
        let result = AuditClient::new(None, AuditSettings::default());
        assert!(matches!(result, Err(AuditError::Configuration(_))));

        let blank = AuditClient::new(Some("   ".to_string()), AuditSettings::default());
        assert!(matches!(blank, Err(AuditError::Configuration(_))));
    }

    #[test]
    fn test_generate_url_uses_model() {
        let url = AuditSettings::default().generate_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_configuration_error() {
        let settings = AuditSettings {
            endpoint: "not a url".to_string(),
            ..AuditSettings::default()
        };
        assert!(matches!(settings.generate_url(), Err(AuditError::Configuration(_))));
    }

    #[test]
    fn test_request_body_carries_instruction_and_tool() {
        let client = AuditClient::new(Some("k".to_string()), AuditSettings::default()).unwrap();
        let body = client.request_body("Analysiere diese Webseite: example.com");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"].as_str(),
            Some(SEO_SYSTEM_INSTRUCTION)
        );
        assert!(body["tools"][0].get("google_search").is_some());
        assert_eq!(body["generationConfig"]["temperature"].as_f64(), Some(0.5));

        let no_tools = AuditClient::new(
            Some("k".to_string()),
            AuditSettings {
                search_grounding: false,
                ..AuditSettings::default()
            },
        )
        .unwrap()
        .request_body("p");
        assert!(no_tools.get("tools").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]
        });
        assert_eq!(response_text(&json), "{\"a\":1}");
        assert_eq!(response_text(&serde_json::json!({})), "");
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_without_request() {
        let client = client_for("http://127.0.0.1:9/".to_string());
        let result = client.generate(&AuditRequest::new("  ")).await;
        assert!(matches!(result, Err(AuditError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_generate_parses_fenced_response() {
        let (endpoint, requests) = one_shot_server("200 OK", gemini_body(AUDIT_TEXT));
        let client = client_for(endpoint);

        let response = client.generate(&AuditRequest::new("example.com")).await.unwrap();
        assert_eq!(response.data.overall_score, 62);
        assert_eq!(
            response.screenshot_url,
            "https://s0.wp.com/mshots/v1/example.com?w=1200&h=800"
        );

        let sent: Value = serde_json::from_str(&requests.recv().unwrap()).unwrap();
        let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Analysiere diese Webseite: example.com"));
    }

    #[tokio::test]
    async fn test_prose_only_response_is_malformed() {
        let (endpoint, _requests) =
            one_shot_server("200 OK", gemini_body("Ich kann diese Seite nicht erreichen."));
        let client = client_for(endpoint);

        let result = client.generate(&AuditRequest::new("example.com")).await;
        assert!(matches!(result, Err(AuditError::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_service_error_is_transport_error() {
        let body = serde_json::json!({
            "error": {"code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED"}
        })
        .to_string();
        let (endpoint, _requests) = one_shot_server("403 Forbidden", body);
        let client = client_for(endpoint);

        match client.generate(&AuditRequest::new("example.com")).await {
            Err(AuditError::Transport(msg)) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("API key not valid."));
            }
            other => panic!("expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = client_for("http://127.0.0.1:9/".to_string());
        let result = client.generate(&AuditRequest::new("example.com")).await;
        assert!(matches!(result, Err(AuditError::Transport(_))));
    }
}
