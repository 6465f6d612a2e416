//! Azure OpenAI chat-completions client
//!
//! One blocking request per analysis: no retries, no streaming. Transport,
//! auth, and quota failures all surface as tagged errors; nothing panics
//! past this boundary.

use crate::config::{AzureConfig, RequestConfig};
use crate::error::{AnalyzerError, Result};
use crate::llm::prompts::AnalysisPrompt;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seam for the completion endpoint, so the pipeline can be exercised
/// without a live deployment.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &AnalysisPrompt) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    n: u8,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct AzureOpenAiClient {
    http: reqwest::Client,
    config: AzureConfig,
    temperature: f32,
    max_tokens: u32,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureConfig, request: &RequestConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request.timeout_secs))
            .build()
            .map_err(|e| {
                AnalyzerError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            config,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }
}

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    async fn complete(&self, prompt: &AnalysisPrompt) -> Result<String> {
        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            n: 1,
        };

        debug!(
            "Requesting completion from deployment '{}' ({} prompt chars)",
            self.config.deployment,
            prompt.user.len()
        );

        let response = self
            .http
            .post(self.completions_url())
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Network(format!("Malformed completion response: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalyzerError::Api {
                status: status.as_u16(),
                message: "model returned no completion".to_string(),
            })?;

        debug!("Completion received ({} chars)", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT};

    fn test_client() -> AzureOpenAiClient {
        let azure = AzureConfig {
            api_key: "key".to_string(),
            endpoint: "https://example.openai.azure.com/".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
        };
        AzureOpenAiClient::new(azure, &RequestConfig::default()).unwrap()
    }

    #[test]
    fn test_completions_url_shape() {
        let client = test_client();
        assert_eq!(
            client.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn test_request_body_serializes_messages_in_order() {
        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: 0.3,
            max_tokens: 800,
            n: 1,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 800);
        assert_eq!(json["n"], 1);
    }
}
