pub mod claude;
pub mod ollama;
pub mod openai;

pub use claude::ClaudeClient;
pub use ollama::OllamaClient;
pub use openai::OpenAIClient;

use anyhow::{Result, anyhow};

use crate::config::Config;
use crate::provider::Provider;

/// Sampling parameters forwarded to whichever provider serves the request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Option<Vec<String>>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.7,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: None,
        }
    }
}

/// One configured provider client.
#[derive(Clone)]
pub enum ProviderClient {
    Ollama(OllamaClient),
    Claude(ClaudeClient),
    OpenAI(OpenAIClient),
}

impl ProviderClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = config.provider();
        let missing_key = || {
            anyhow!(
                "{} needs an API key: set {} or add it to the config file",
                provider.display_name(),
                provider.api_key_env().unwrap_or_default()
            )
        };

        Ok(match provider {
            Provider::Ollama => ProviderClient::Ollama(OllamaClient::new(&config.ollama_url)),
            Provider::Claude => {
                let key = config.claude_api_key.as_deref().ok_or_else(missing_key)?;
                ProviderClient::Claude(ClaudeClient::new(key))
            }
            Provider::OpenAI => {
                let key = config.openai_api_key.as_deref().ok_or_else(missing_key)?;
                ProviderClient::OpenAI(OpenAIClient::new(key))
            }
        })
    }

    pub fn provider(&self) -> Provider {
        match self {
            ProviderClient::Ollama(_) => Provider::Ollama,
            ProviderClient::Claude(_) => Provider::Claude,
            ProviderClient::OpenAI(_) => Provider::OpenAI,
        }
    }

    pub async fn query(&self, model: &str, prompt: &str, options: &GenerationOptions) -> Result<String> {
        match self {
            ProviderClient::Ollama(client) => client.query(model, prompt, options).await,
            ProviderClient::Claude(client) => client.query(model, prompt, options).await,
            ProviderClient::OpenAI(client) => client.query(model, prompt, options).await,
        }
    }

    pub async fn list_models(&self) -> Result<Vec<String>> {
        match self {
            ProviderClient::Ollama(client) => client.list_models().await,
            ProviderClient::Claude(_) => Ok(ClaudeClient::list_models()),
            ProviderClient::OpenAI(_) => Ok(OpenAIClient::list_models()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_provider_without_key_is_an_error() {
        let mut config = Config::new();
        config.provider = Some("claude".to_string());
        let err = ProviderClient::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn picks_configured_provider() {
        let mut config = Config::new();
        config.provider = Some("openai".to_string());
        config.openai_api_key = Some("sk-test".to_string());
        let client = ProviderClient::from_config(&config).unwrap();
        assert_eq!(client.provider(), Provider::OpenAI);

        let client = ProviderClient::from_config(&Config::new()).unwrap();
        assert_eq!(client.provider(), Provider::Ollama);
    }
}
