use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use crate::app::App;
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent, events: &UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Key(key) => handle_key(app, key, events),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Generated(result) => {
            app.apply_result(result);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &UnboundedSender<AppEvent>) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Enter => submit(app, events),
        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = app.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.input, app.cursor);
            app.input.insert(byte_pos, c);
            app.cursor += 1;
        }
        _ => {}
    }
}

/// Validate the current input and, when it holds a prompt, send it on a
/// background task. The result comes back as `AppEvent::Generated`.
///
/// A submission made while another is in flight is sent as well.
fn submit(app: &mut App, events: &UnboundedSender<AppEvent>) {
    let Some(pending) = app.handler.begin(&app.input, &mut app.page) else {
        return;
    };

    let events = events.clone();
    tokio::spawn(async move {
        let result = pending.send().await;
        // The receiver is gone only when the app is shutting down.
        let _ = events.send(AppEvent::Generated(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_core::{UiState, VALIDATION_ERROR_MESSAGE};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, events: &UnboundedSender<AppEvent>, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)), events);
        }
    }

    #[test]
    fn editing_is_utf8_safe() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new("http://127.0.0.1:1");

        type_text(&mut app, &tx, "héllo");
        handle_event(&mut app, key(KeyCode::Left), &tx);
        handle_event(&mut app, key(KeyCode::Left), &tx);
        handle_event(&mut app, key(KeyCode::Backspace), &tx);
        assert_eq!(app.input, "hélo");

        handle_event(&mut app, key(KeyCode::Home), &tx);
        handle_event(&mut app, key(KeyCode::Delete), &tx);
        handle_event(&mut app, key(KeyCode::Char('¡')), &tx);
        assert_eq!(app.input, "¡élo");
        assert_eq!(app.cursor, 1);

        handle_event(&mut app, key(KeyCode::End), &tx);
        assert_eq!(app.cursor, 4);
    }

    #[test]
    fn blank_submit_shows_validation_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new("http://127.0.0.1:1");

        type_text(&mut app, &tx, "   ");
        handle_event(&mut app, key(KeyCode::Enter), &tx);

        assert_eq!(app.page.output_text(), VALIDATION_ERROR_MESSAGE);
        assert_eq!(app.page.state(), UiState::Error);
        assert_eq!(app.input, "   ");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn submit_reports_back_through_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // Nothing listens on port 1, so the request fails fast.
        let mut app = App::new("http://127.0.0.1:1");

        type_text(&mut app, &tx, "hi");
        handle_event(&mut app, key(KeyCode::Enter), &tx);
        assert_eq!(app.page.state(), UiState::Loading);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Generated(Err(_))));
        handle_event(&mut app, event, &tx);

        assert!(!app.page.is_loading());
        assert_eq!(app.page.state(), UiState::Error);
        assert_eq!(app.input, "hi");
    }

    #[test]
    fn ctrl_c_and_esc_quit() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new("http://127.0.0.1:1");
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            &tx,
        );
        assert!(app.should_quit);

        let mut app = App::new("http://127.0.0.1:1");
        handle_event(&mut app, key(KeyCode::Esc), &tx);
        assert!(app.should_quit);
    }
}
