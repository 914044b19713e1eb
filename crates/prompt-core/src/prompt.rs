use serde::Serialize;
use thiserror::Error;

/// Message shown when a submission is rejected before any request is made.
pub const VALIDATION_ERROR_MESSAGE: &str = "Please provide a valid prompt.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prompt is empty or whitespace")]
    Empty,
}

/// A prompt that passed validation.
///
/// The text is kept exactly as the user typed it; trimming is only used to
/// decide whether there is anything to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
