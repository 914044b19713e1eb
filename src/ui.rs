use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use prompt_core::UiState;
use unicode_width::UnicodeWidthChar;
use crate::app::App;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, output, loading indicator, input, footer
    let [header_area, output_area, indicator_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_output(app, frame, output_area);
    render_indicator(app, frame, indicator_area);
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Prompt Console ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!(" {} ", app.backend_url), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_output(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.page.state();
    let border_color = match state {
        UiState::Error => Color::Red,
        UiState::Loading => Color::Yellow,
        UiState::Idle => Color::DarkGray,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Response ");

    let text = if app.page.has_error() {
        Text::from(Span::styled(
            app.page.output_text().to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if app.page.output_text().is_empty() && state == UiState::Idle {
        Text::from(Span::styled(
            "Type a prompt below and press Enter...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(app.page.output_text().to_string())
    };

    let output = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(output, area);
}

fn render_indicator(app: &App, frame: &mut Frame, area: Rect) {
    if !app.page.is_loading() {
        return;
    }

    // Animated ellipsis: cycles through ".", "..", "..."
    let dots = ".".repeat((app.animation_frame as usize) + 1);
    let indicator = Paragraph::new(Span::styled(
        format!(" Generating{}", dots),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(indicator, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Prompt ");

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = visible_input(&app.input, app.cursor, inner_width);

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" Enter ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" submit  "),
        Span::styled(" Esc ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}

/// Slice of `input` that fits a box `width` columns wide with the cursor (a
/// char index) in view, and the cursor's column inside the box. Wide chars
/// such as CJK and emoji take two columns.
fn visible_input(input: &str, cursor: usize, width: usize) -> (String, u16) {
    let widths: Vec<usize> = input
        .chars()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0))
        .collect();

    let mut column: usize = widths.iter().sum();
    let mut scroll_offset = 0;
    while column >= width && scroll_offset < widths.len() {
        column -= widths[scroll_offset];
        scroll_offset += 1;
    }

    let mut used = 0;
    let visible = input
        .chars()
        .skip(scroll_offset)
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect();

    (visible, column as u16)
}
