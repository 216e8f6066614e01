use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nr_core::{Error, InferenceModel, Result};

use crate::prompt::summarize_prompt;
use crate::Config;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completion client for OpenAI and compatible endpoints.
pub struct OpenAiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model_name: String,
    temperature: f32,
}

impl OpenAiModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;

        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            model_name: config.model_name().to_string(),
            temperature: config.temperature,
        })
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn summarize(&self, query: &str, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: summarize_prompt(query, text),
            }],
            temperature: self.temperature,
        };
        debug!(model = %self.model_name, chars = text.len(), "Requesting completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!("API error {}: {}", status, body)));
        }

        let response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::Inference(format!("Malformed completion response: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Inference("Completion response has no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn config(base_url: String) -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            base_url: Some(base_url),
            ..Default::default()
        }
    }

    #[test]
    fn test_model_requires_api_key() {
        let result = OpenAiModel::new(&Config::default());
        assert_eq!(result.unwrap_err().to_string(), "Configuration error: OpenAI API key is required");

        let result = OpenAiModel::new(&Config {
            api_key: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());

        assert!(OpenAiModel::new(&config("http://localhost".to_string())).is_ok());
    }

    #[tokio::test]
    async fn test_summarize_with_mock() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.0,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {"role": "assistant", "content": " Revenue rose 12%. Sentiment: Positive \n"},
                        "finish_reason": "stop"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let model = OpenAiModel::new(&config(server.url())).unwrap();
        let summary = model
            .summarize("quarterly results", "Title: A\nDescription: B")
            .await
            .unwrap();
        assert_eq!(summary, "Revenue rose 12%. Sentiment: Positive");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_is_an_inference_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let model = OpenAiModel::new(&config(server.url())).unwrap();
        let err = model.summarize("q", "text").await.unwrap_err();
        assert!(err.is_provider());
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_inference_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let model = OpenAiModel::new(&config(format!("{}/", server.url()))).unwrap();
        let err = model.summarize("q", "text").await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
