use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompt::Prompt;

pub const GENERATE_PATH: &str = "/api/generate_response";

/// Failure of the generate request. Every variant is shown to the user as the
/// same generic message; the variants exist for tests and callers that care.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request could not be sent: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend answered with status {0}")]
    Status(u16),
    #[error("backend reply is not a generate response: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, RequestError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a Prompt,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for the backend's `POST /api/generate_response`.
#[derive(Clone)]
pub struct HttpGenerateClient {
    client: Client,
    endpoint: String,
}

impl HttpGenerateClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerateClient for HttpGenerateClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, RequestError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(RequestError::Transport)?;

        if !response.status().is_success() {
            return Err(RequestError::Status(response.status().as_u16()));
        }

        let body: GenerateResponse = response.json().await.map_err(RequestError::Malformed)?;
        Ok(body.response)
    }
}
