use colored::*;
use prompt_core::View;

/// Line-oriented view for the one-shot `ask` command. The response goes to
/// stdout; everything else goes to stderr so output can be piped.
pub struct ConsoleView;

impl View for ConsoleView {
    fn show_loading(&mut self) {
        eprintln!("{}", "Generating...".dimmed());
    }

    fn hide_loading(&mut self) {}

    fn show_response(&mut self, text: &str) {
        println!("{}", text);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{}", message.red().bold());
    }
}
