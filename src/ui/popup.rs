use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const INTRO_PARAGRAPHS: [&str; 2] = [
    "Self-directed test taking is one of the most effective ways to learn material and \
     keep it from being forgotten. Testing yourself soon after studying forces recall, \
     which strengthens memory far more than re-reading.",
    "Paste or extract any text, let the model write test questions about it, study, then \
     answer the questions and get feedback on each answer.",
];

fn popup_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn dismiss_line() -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Close"),
    ])
}

pub fn draw_intro(f: &mut Frame) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let mut text = Text::default();
    for paragraph in INTRO_PARAGRAPHS {
        text.push_line(Line::from(paragraph));
        text.push_line(Line::from(""));
    }
    text.push_line(dismiss_line());

    let intro = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(popup_block("Welcome to TestMe", Color::Cyan));
    f.render_widget(intro, area);
}

pub fn draw_alert(f: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let mut text = Text::default();
    text.push_line(Line::from(message.to_string()));
    text.push_line(Line::from(""));
    text.push_line(dismiss_line());

    let alert = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(popup_block(title, Color::Red));
    f.render_widget(alert, area);
}

pub fn draw_loading(f: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);

    let loading = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(popup_block(title, Color::Yellow));
    f.render_widget(loading, area);
}
