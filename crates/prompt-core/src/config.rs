use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::provider::Provider;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_RATE_LIMIT_SECS: u64 = 5;
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub provider: Option<String>,
    pub default_model: Option<String>,
    pub ollama_url: String,
    pub claude_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub debug: bool,
    pub rate_limit_secs: u64,
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            provider: Some("ollama".to_string()),
            default_model: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            claude_api_key: None,
            openai_api_key: None,
            port: DEFAULT_PORT,
            debug: false,
            rate_limit_secs: DEFAULT_RATE_LIMIT_SECS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Load the config file (or defaults when there is none) and apply
    /// environment overrides on top.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::get_config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PROMPT_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(provider) = lookup("PROMPT_PROVIDER") {
            self.provider = Some(provider);
        }
        if let Some(model) = lookup("PROMPT_MODEL") {
            self.default_model = Some(model);
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            self.ollama_url = url;
        }
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.claude_api_key = Some(key);
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(debug) = lookup("DEBUG") {
            self.debug = matches!(debug.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(secs) = lookup("RATE_LIMIT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            self.rate_limit_secs = secs;
        }
        if let Some(capacity) = lookup("CACHE_CAPACITY").and_then(|v| v.parse::<usize>().ok()) {
            self.cache_capacity = capacity;
        }
    }

    /// Provider named in the config, falling back to Ollama for unknown names.
    pub fn provider(&self) -> Provider {
        self.provider
            .as_deref()
            .and_then(Provider::from_str)
            .unwrap_or(Provider::Ollama)
    }

    pub fn model(&self) -> String {
        self.default_model
            .clone()
            .unwrap_or_else(|| self.provider().default_model().to_string())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("prompt-console").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::new();
        config.backend_url = "http://10.0.0.2:8000".to_string();
        config.provider = Some("claude".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url, "http://10.0.0.2:8000");
        assert_eq!(loaded.provider(), Provider::Claude);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "port": 8080 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit_secs, DEFAULT_RATE_LIMIT_SECS);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.ollama_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn env_overrides_file_values() {
        let vars: HashMap<&str, &str> = [
            ("PROMPT_BACKEND_URL", "http://backend.test"),
            ("PROMPT_PROVIDER", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
            ("DEBUG", "True"),
            ("CACHE_CAPACITY", "32"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::new();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend_url, "http://backend.test");
        assert_eq!(config.provider(), Provider::OpenAI);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.debug);
        assert_eq!(config.cache_capacity, 32);
    }

    #[test]
    fn model_falls_back_to_provider_default() {
        let mut config = Config::new();
        config.provider = Some("mystery".to_string());
        assert_eq!(config.model(), Provider::Ollama.default_model());

        config.default_model = Some("mistral:7b".to_string());
        assert_eq!(config.model(), "mistral:7b");
    }
}
