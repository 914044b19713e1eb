pub mod ai;
pub mod client;
pub mod config;
pub mod prompt;
pub mod provider;
pub mod submission;
pub mod view;

// Re-export main types for convenience
pub use ai::{ClaudeClient, GenerationOptions, OllamaClient, OpenAIClient, ProviderClient};
pub use client::{GenerateClient, HttpGenerateClient, RequestError};
pub use config::Config;
pub use prompt::{Prompt, ValidationError, VALIDATION_ERROR_MESSAGE};
pub use provider::Provider;
pub use submission::{Outcome, PendingRequest, SubmissionHandler, REQUEST_ERROR_MESSAGE};
pub use view::{LoadingIndicator, OutputArea, PageView, UiState, View};
