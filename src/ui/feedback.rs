use super::{draw_header, draw_help, help_line};
use crate::app::App;
use crate::models::FeedbackItem;
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::{calculate_max_scroll, estimate_text_height, html_to_text, render_markdown};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Question, the user's answer and the sanitized feedback for every item, in order.
pub fn build_feedback_text(items: &[FeedbackItem]) -> Text<'static> {
    let mut text = Text::default();

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            text.push_line(Line::from(""));
        }
        text.push_line(Line::from(Span::styled(
            format!("{}. {}", i + 1, item.question),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        let answer = if item.answer.trim().is_empty() {
            Span::styled(
                "(no answer)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::from(item.answer.clone())
        };
        text.push_line(Line::from(vec![
            Span::styled(
                "Your answer: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            answer,
        ]));

        text.extend(render_markdown(&html_to_text(&item.feedback)));
    }

    text
}

pub fn draw_feedback(f: &mut Frame, app: &mut App) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "TestMe - Feedback");

    let content = build_feedback_text(&app.session.feedback);

    let visible_height = layout.body_area.height.saturating_sub(2) as usize;
    let text_width = layout.body_area.width.saturating_sub(2) as usize;
    let content_height = estimate_text_height(&content, text_width);
    let max_scroll = calculate_max_scroll(content_height, visible_height);
    // Keep the stored offset bounded so scrolling back up responds immediately
    app.feedback_scroll = app.feedback_scroll.min(max_scroll);

    let feedback = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .scroll((app.feedback_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Feedback"));
    f.render_widget(feedback, layout.body_area);

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("↑/↓", "Scroll"),
            ("PgUp/PgDn", "Page"),
            ("r", "Start Over"),
            ("q", "Quit"),
        ])],
    );
}
