use prompt_core::{GenerationOptions, Prompt, Provider};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("Prompt cannot be empty.")]
    EmptyPrompt,
    #[error("Max tokens must be greater than 0.")]
    MaxTokens,
    #[error("{0} must be between 0 and 1.")]
    OutOfRange(&'static str),
}

fn default_max_tokens() -> i64 {
    100
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default)]
    pub frequency_penalty: f32,
    #[serde(default)]
    pub presence_penalty: f32,
    #[serde(default)]
    pub stop: Option<Vec<String>>,
}

impl PromptRequest {
    /// Check every field and produce the options to forward to the provider.
    pub fn validate(&self) -> Result<GenerationOptions, InvalidRequest> {
        Prompt::parse(&self.prompt).map_err(|_| InvalidRequest::EmptyPrompt)?;

        if self.max_tokens <= 0 {
            return Err(InvalidRequest::MaxTokens);
        }

        let unit_ranged = [
            ("Temperature", self.temperature),
            ("Top P", self.top_p),
            ("Frequency penalty", self.frequency_penalty),
            ("Presence penalty", self.presence_penalty),
        ];
        for (name, value) in unit_ranged {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidRequest::OutOfRange(name));
            }
        }

        Ok(GenerationOptions {
            max_tokens: u32::try_from(self.max_tokens).unwrap_or(u32::MAX),
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
            stop: self.stop.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub provider: Provider,
    pub models: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
