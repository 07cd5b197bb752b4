pub mod layout;
mod answers;
mod credential;
mod feedback;
mod popup;
mod progress;
mod source;

pub use answers::draw_answers;
pub use credential::draw_credential;
pub use feedback::{build_feedback_text, draw_feedback};
pub use layout::{calculate_answer_chunks, calculate_screen_chunks, calculate_source_chunks};
pub use popup::{draw_alert, draw_intro, draw_loading};
pub use progress::{draw_generated, draw_generating};
pub use source::draw_source;

use crate::app::{App, Popup};
use crate::input::TextInput;
use crate::utils::calculate_wrapped_cursor_position;
use crate::workflow::WorkflowState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the screen for the current workflow state, then any popup on top.
pub fn draw(f: &mut Frame, app: &mut App) {
    match app.session.state {
        WorkflowState::AwaitingCredential => draw_credential(f, app),
        WorkflowState::AwaitingSource => draw_source(f, app),
        WorkflowState::Generating => draw_generating(f, app),
        WorkflowState::Generated => draw_generated(f, app),
        WorkflowState::Answering => draw_answers(f, app),
        WorkflowState::Graded => draw_feedback(f, app),
    }

    if app.session.state == WorkflowState::Generating {
        draw_loading(f, "Generating Test", "Please wait while we create your test questions...");
    } else if app.session.grading_in_progress {
        draw_loading(f, "Checking Answers", "Please wait while your answers are graded...");
    }

    match &app.popup {
        Some(Popup::Intro) => draw_intro(f),
        Some(Popup::Alert { title, message }) => draw_alert(f, title, message),
        None => {}
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// One help line: each `(key, label)` as a highlighted key followed by its label.
pub(crate) fn help_line(keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(key.to_string(), key_style()));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    Line::from(spans)
}

pub(crate) fn draw_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub(crate) fn draw_help(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let help = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

/// Render a bordered text input. When focused, the terminal cursor is placed
/// at the input's cursor and the view scrolls to keep it visible.
pub(crate) fn draw_text_input(
    f: &mut Frame,
    area: Rect,
    input: &mut TextInput,
    title: &str,
    placeholder: &str,
    focused: bool,
    masked: bool,
) {
    let shown = if masked {
        "*".repeat(input.text().chars().count())
    } else {
        input.text().to_string()
    };
    // Masked text is ASCII, so the char cursor is also its byte offset
    let cursor_byte = if masked {
        input.cursor()
    } else {
        input.cursor_byte_index()
    };

    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) =
        calculate_wrapped_cursor_position(&shown, cursor_byte, text_width);

    let mut new_scroll = input.scroll_y as usize;
    if cursor_line < new_scroll {
        new_scroll = cursor_line;
    } else if visible_height > 0 && cursor_line >= new_scroll + visible_height {
        new_scroll = cursor_line - visible_height + 1;
    }
    input.scroll_y = new_scroll as u16;

    let content = if shown.is_empty() {
        Text::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(shown)
    };

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let widget = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .scroll((input.scroll_y, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );
    f.render_widget(widget, area);

    if focused {
        let cursor_x = area.x + 1 + cursor_col as u16;
        let cursor_y = area.y + 1 + (cursor_line as u16).saturating_sub(input.scroll_y);
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::credential::MemoryCredentialStore;
    use crate::models::FeedbackItem;
    use crate::workflow::QuizSession;
    use ratatui::{backend::TestBackend, Terminal};

    fn app_in(state: WorkflowState) -> App {
        let mut session = QuizSession::new();
        session.state = state;
        session.credential = Some("sk-test".to_string());
        let mut app = App::new(
            session,
            Box::new(MemoryCredentialStore::default()),
            AppConfig::default(),
        );
        app.popup = None;
        app
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % width as usize == 0 {
                out.push('\n');
            }
        }
        out
    }

    #[test]
    fn test_help_line_spans() {
        let line = help_line(&[("Enter", "Submit"), ("Esc", "Quit")]);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.to_string(), "Enter Submit  Esc Quit  ");
        assert!(line.spans[0].style.add_modifier.intersects(Modifier::BOLD));
    }

    #[test]
    fn test_credential_screen_masks_key() {
        let mut app = app_in(WorkflowState::AwaitingCredential);
        app.credential_input.set_text("secret".to_string());
        let screen = render(&mut app, 80, 24);
        assert!(screen.contains("******"));
        assert!(!screen.contains("secret"));
    }

    #[test]
    fn test_intro_popup_drawn_over_screen() {
        let mut app = app_in(WorkflowState::AwaitingCredential);
        app.popup = Some(Popup::Intro);
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Welcome to TestMe"));
    }

    #[test]
    fn test_alert_popup_shows_message() {
        let mut app = app_in(WorkflowState::AwaitingSource);
        app.alert("Error generating questions", "boom");
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Error generating questions"));
        assert!(screen.contains("boom"));
    }

    #[test]
    fn test_loading_popup_while_generating() {
        let mut app = app_in(WorkflowState::Generating);
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Generating Test"));
    }

    #[test]
    fn test_answers_screen_shows_current_question() {
        let mut app = app_in(WorkflowState::Answering);
        app.session.questions = vec!["What is ATP?".to_string(), "What is DNA?".to_string()];
        app.current_question = 1;
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Question 2 / 2"));
        assert!(screen.contains("What is DNA?"));
    }

    #[test]
    fn test_feedback_screen_never_shows_markup() {
        let mut app = app_in(WorkflowState::Graded);
        app.session.feedback = vec![FeedbackItem {
            question: "What is ATP?".to_string(),
            answer: "Energy".to_string(),
            feedback: "<p>Good, <strong>correct</strong></p>".to_string(),
        }];
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("What is ATP?"));
        assert!(screen.contains("correct"));
        assert!(!screen.contains("<p>"));
        assert!(!screen.contains("<strong>"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        for state in [
            WorkflowState::AwaitingCredential,
            WorkflowState::AwaitingSource,
            WorkflowState::Generating,
            WorkflowState::Generated,
            WorkflowState::Answering,
            WorkflowState::Graded,
        ] {
            let mut app = app_in(state);
            app.session.questions = vec!["Q".to_string()];
            render(&mut app, 10, 5);
        }
    }
}
