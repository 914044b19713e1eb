use reqwest::Client;
use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};

use super::GenerationOptions;

#[derive(Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    messages: Vec<ClaudeMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
}

impl ClaudeRequest {
    /// Frequency and presence penalties have no Messages API counterpart and
    /// are dropped.
    fn new(model: &str, prompt: &str, options: &GenerationOptions) -> Self {
        Self {
            model: model.to_string(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stop_sequences: options.stop.clone(),
        }
    }
}

#[derive(Deserialize)]
struct ClaudeContent {
    text: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
}

impl ClaudeClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn query(&self, model: &str, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let request = ClaudeRequest::new(model, prompt, options);

        let response = self.client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Claude API error {}: {}", status, text));
        }

        let claude_response: ClaudeResponse = response.json().await?;
        Ok(claude_response.content.into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join(""))
    }

    pub fn list_models() -> Vec<String> {
        vec![
            "claude-sonnet-4-20250514".to_string(),
            "claude-3-5-sonnet-20241022".to_string(),
            "claude-3-5-haiku-20241022".to_string(),
            "claude-3-opus-20240229".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_drops_penalties() {
        let options = GenerationOptions {
            max_tokens: 64,
            temperature: 0.5,
            top_p: 0.25,
            frequency_penalty: 0.5,
            presence_penalty: 1.5,
            stop: None,
        };
        let json = serde_json::to_value(ClaudeRequest::new("claude-3-5-haiku-20241022", "hi", &options)).unwrap();

        assert_eq!(json["max_tokens"], 64);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["top_p"], 0.25);
        assert_eq!(json["messages"][0]["content"], "hi");
        assert!(json.get("frequency_penalty").is_none());
        assert!(json.get("presence_penalty").is_none());
        assert!(json.get("stop_sequences").is_none());
    }

    #[test]
    fn stop_is_sent_as_stop_sequences() {
        let options = GenerationOptions {
            stop: Some(vec!["END".to_string()]),
            ..Default::default()
        };
        let json = serde_json::to_value(ClaudeRequest::new("claude-3-5-haiku-20241022", "hi", &options)).unwrap();

        assert_eq!(json["stop_sequences"], serde_json::json!(["END"]));
        assert!(json.get("stop").is_none());
    }
}
