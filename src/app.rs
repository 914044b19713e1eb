use prompt_core::{HttpGenerateClient, Outcome, PageView, RequestError, SubmissionHandler};

pub struct App {
    // Core state
    pub should_quit: bool,

    // Prompt input
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars

    // Output area and loading indicator
    pub page: PageView,
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Backend
    pub backend_url: String,
    pub handler: SubmissionHandler<HttpGenerateClient>,
}

impl App {
    pub fn new(backend_url: &str) -> Self {
        Self {
            should_quit: false,
            input: String::new(),
            cursor: 0,
            page: PageView::new(),
            animation_frame: 0,
            backend_url: backend_url.to_string(),
            handler: SubmissionHandler::new(HttpGenerateClient::new(backend_url)),
        }
    }

    /// Render a finished request. A successful answer also clears the prompt.
    pub fn apply_result(&mut self, result: Result<String, RequestError>) -> Outcome {
        let outcome = self.handler.finish(&mut self.page, result);
        if outcome == Outcome::Succeeded {
            self.input.clear();
            self.cursor = 0;
        }
        outcome
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.page.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        } else {
            self.animation_frame = 0;
        }
    }
}
