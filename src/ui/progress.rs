use super::{draw_header, draw_help, help_line};
use crate::app::App;
use crate::ui::layout::calculate_screen_chunks;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_generating(f: &mut Frame, app: &mut App) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "TestMe - Generating Test");

    let source = Paragraph::new(app.session.source_text.as_str())
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Source Text"));
    f.render_widget(source, layout.body_area);

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[("Ctrl+C", "Exit App")])],
    );
}

/// Test is ready: the questions stay hidden while the user studies the material.
pub fn draw_generated(f: &mut Frame, app: &mut App) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "TestMe - Test Generated");

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(layout.body_area);

    let count = app.session.questions.len();
    let mut ready = Text::default();
    ready.push_line(Line::from(Span::styled(
        format!(
            "Your test is ready: {} question{}.",
            count,
            if count == 1 { "" } else { "s" }
        ),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    ready.push_line(Line::from(
        "Review the material below, then press Enter when you're done studying.",
    ));
    let notice = Paragraph::new(ready)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notice, body[0]);

    let source = Paragraph::new(app.session.source_text.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Study Material"));
    f.render_widget(source, body[1]);

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("Enter", "Done Studying"),
            ("Esc", "Quit"),
            ("Ctrl+C", "Exit App"),
        ])],
    );
}
