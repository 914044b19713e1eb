//! UI-agnostic view types
//!
//! The submission handler never touches a concrete UI. Front ends (the TUI,
//! the one-shot console command, tests) hand it something implementing
//! [`View`] and render from whatever that view records.

/// Display surface driven by the submission handler.
pub trait View {
    /// Show the loading indicator and clear stale output and error styling.
    fn show_loading(&mut self);

    /// Hide the loading indicator.
    fn hide_loading(&mut self);

    /// Replace the output with `text` and drop the error style.
    fn show_response(&mut self, text: &str);

    /// Replace the output with `message` and apply the error style.
    fn show_error(&mut self, message: &str);
}

/// The three mutually exclusive display modes of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Output container: the text shown to the user plus the error-style flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArea {
    pub text: String,
    pub error_style: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingIndicator {
    pub visible: bool,
}

/// Reference [`View`] holding the output area and the loading indicator.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub output: OutputArea,
    pub indicator: LoadingIndicator,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UiState {
        if self.indicator.visible {
            UiState::Loading
        } else if self.output.error_style {
            UiState::Error
        } else {
            UiState::Idle
        }
    }

    pub fn output_text(&self) -> &str {
        &self.output.text
    }

    pub fn is_loading(&self) -> bool {
        self.indicator.visible
    }

    pub fn has_error(&self) -> bool {
        self.output.error_style
    }
}

impl View for PageView {
    fn show_loading(&mut self) {
        self.output.text.clear();
        self.output.error_style = false;
        self.indicator.visible = true;
    }

    fn hide_loading(&mut self) {
        self.indicator.visible = false;
    }

    fn show_response(&mut self, text: &str) {
        self.output.text = text.to_string();
        self.output.error_style = false;
    }

    fn show_error(&mut self, message: &str) {
        self.output.text = message.to_string();
        self.output.error_style = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_page_is_idle() {
        let page = PageView::new();
        assert_eq!(page.state(), UiState::Idle);
        assert!(page.output_text().is_empty());
    }

    #[test]
    fn loading_clears_stale_error() {
        let mut page = PageView::new();
        page.show_error("boom");
        assert_eq!(page.state(), UiState::Error);

        page.show_loading();
        assert_eq!(page.state(), UiState::Loading);
        assert!(page.output_text().is_empty());
        assert!(!page.has_error());
    }

    #[test]
    fn response_replaces_error_style() {
        let mut page = PageView::new();
        page.show_error("boom");
        page.show_response("fine");
        assert_eq!(page.output_text(), "fine");
        assert_eq!(page.state(), UiState::Idle);
    }
}
