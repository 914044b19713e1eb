//! The submit → validate → request → render cycle.
//!
//! [`SubmissionHandler::begin`] does the synchronous half and hands back a
//! [`PendingRequest`]. The caller decides how to drive it: await it inline, or
//! spawn it and pass the result to [`SubmissionHandler::finish`] once it lands.
//! [`SubmissionHandler::submit`] chains all three for callers that can block
//! on the view.

use std::sync::Arc;

use crate::client::{GenerateClient, RequestError};
use crate::prompt::{Prompt, VALIDATION_ERROR_MESSAGE};
use crate::view::View;

/// Message shown for any failed request, whatever the cause.
pub const REQUEST_ERROR_MESSAGE: &str =
    "An error occurred while processing your request. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rejected,
    Succeeded,
    Failed,
}

pub struct SubmissionHandler<C: ?Sized> {
    client: Arc<C>,
}

impl<C: ?Sized> Clone for SubmissionHandler<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: GenerateClient> SubmissionHandler<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl<C: GenerateClient + ?Sized> SubmissionHandler<C> {
    pub fn from_arc(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Validate `raw` and, if it holds a prompt, switch the view to loading.
    ///
    /// Returns `None` when the submission was rejected; the view then shows
    /// the validation message and no request exists.
    pub fn begin<V: View + ?Sized>(&self, raw: &str, view: &mut V) -> Option<PendingRequest<C>> {
        match Prompt::parse(raw) {
            Ok(prompt) => {
                tracing::debug!("submission accepted, request starting");
                view.show_loading();
                Some(PendingRequest {
                    client: Arc::clone(&self.client),
                    prompt,
                })
            }
            Err(_) => {
                tracing::debug!("submission rejected by validation");
                view.show_error(VALIDATION_ERROR_MESSAGE);
                None
            }
        }
    }

    /// Render the result of a request and take the view out of loading.
    pub fn finish<V: View + ?Sized>(
        &self,
        view: &mut V,
        result: Result<String, RequestError>,
    ) -> Outcome {
        let outcome = match result {
            Ok(text) => {
                view.show_response(&text);
                Outcome::Succeeded
            }
            Err(_) => {
                view.show_error(REQUEST_ERROR_MESSAGE);
                Outcome::Failed
            }
        };
        view.hide_loading();
        tracing::debug!(?outcome, "request completed");
        outcome
    }

    pub async fn submit<V: View + ?Sized>(&self, raw: &str, view: &mut V) -> Outcome {
        let Some(pending) = self.begin(raw, view) else {
            return Outcome::Rejected;
        };
        let result = pending.send().await;
        self.finish(view, result)
    }
}

/// A validated prompt waiting to be sent. Owns everything the request needs,
/// so it can be moved onto another task.
pub struct PendingRequest<C: ?Sized> {
    client: Arc<C>,
    prompt: Prompt,
}

impl<C: GenerateClient + ?Sized> PendingRequest<C> {
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub async fn send(self) -> Result<String, RequestError> {
        self.client.generate(&self.prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{PageView, UiState};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed reply.
    struct ScriptedClient {
        reply: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn answering(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerateClient for ScriptedClient {
        async fn generate(&self, prompt: &Prompt) -> Result<String, RequestError> {
            self.calls.lock().unwrap().push(prompt.as_str().to_string());
            self.reply.clone().ok_or(RequestError::Status(500))
        }
    }

    /// Keeps the order of view calls.
    #[derive(Default)]
    struct TraceView(Vec<String>);

    impl View for TraceView {
        fn show_loading(&mut self) {
            self.0.push("loading".into());
        }
        fn hide_loading(&mut self) {
            self.0.push("hide".into());
        }
        fn show_response(&mut self, text: &str) {
            self.0.push(format!("response:{text}"));
        }
        fn show_error(&mut self, message: &str) {
            self.0.push(format!("error:{message}"));
        }
    }

    #[tokio::test]
    async fn blank_prompts_never_reach_the_client() {
        let client = Arc::new(ScriptedClient::answering("unused"));
        let handler = SubmissionHandler::from_arc(Arc::clone(&client));

        for raw in ["", "   ", "\n\t"] {
            let mut page = PageView::new();
            assert_eq!(handler.submit(raw, &mut page).await, Outcome::Rejected);
            assert_eq!(page.output_text(), VALIDATION_ERROR_MESSAGE);
            assert_eq!(page.state(), UiState::Error);
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_prompt_is_sent_once_verbatim() {
        let client = Arc::new(ScriptedClient::answering("Hello"));
        let handler = SubmissionHandler::from_arc(Arc::clone(&client));
        let mut page = PageView::new();

        let outcome = handler.submit(" what is rust? ", &mut page).await;

        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(client.calls(), vec![" what is rust? ".to_string()]);
        assert_eq!(page.output_text(), "Hello");
        assert!(!page.has_error());
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn failure_shows_generic_message() {
        let handler = SubmissionHandler::new(ScriptedClient::failing());
        let mut page = PageView::new();

        assert_eq!(handler.submit("hi", &mut page).await, Outcome::Failed);
        assert_eq!(page.output_text(), REQUEST_ERROR_MESSAGE);
        assert!(page.has_error());
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn loading_is_hidden_last() {
        let handler = SubmissionHandler::new(ScriptedClient::answering("ok"));
        let mut view = TraceView::default();
        handler.submit("go", &mut view).await;
        assert_eq!(view.0, vec!["loading", "response:ok", "hide"]);

        let handler = SubmissionHandler::new(ScriptedClient::failing());
        let mut view = TraceView::default();
        handler.submit("go", &mut view).await;
        assert_eq!(
            view.0,
            vec!["loading".to_string(), format!("error:{REQUEST_ERROR_MESSAGE}"), "hide".to_string()]
        );
    }

    #[tokio::test]
    async fn repeated_submissions_are_independent() {
        let client = Arc::new(ScriptedClient::answering("same"));
        let handler = SubmissionHandler::from_arc(Arc::clone(&client));
        let mut page = PageView::new();

        assert_eq!(handler.submit("again", &mut page).await, Outcome::Succeeded);
        let first = (page.output_text().to_string(), page.state());
        assert_eq!(handler.submit("again", &mut page).await, Outcome::Succeeded);
        let second = (page.output_text().to_string(), page.state());

        assert_eq!(first, second);
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn pending_request_can_run_on_another_task() {
        let handler = SubmissionHandler::new(ScriptedClient::answering("from task"));
        let mut page = PageView::new();

        let pending = handler.begin("spawned", &mut page).unwrap();
        assert_eq!(pending.prompt().as_str(), "spawned");
        assert_eq!(page.state(), UiState::Loading);

        let result = tokio::spawn(pending.send()).await.unwrap();
        assert_eq!(handler.finish(&mut page, result), Outcome::Succeeded);
        assert_eq!(page.output_text(), "from task");
        assert_eq!(page.state(), UiState::Idle);
    }
}
