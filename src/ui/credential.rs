use super::{draw_header, draw_help, draw_text_input, help_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn draw_credential(f: &mut Frame, app: &mut App) {
    let layout = super::calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "TestMe - API Key");

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(layout.body_area);

    let prompt = Paragraph::new(
        "Enter your OpenRouter API key. It is saved locally so you only need to do this once.",
    )
    .style(Style::default().fg(Color::White))
    .wrap(Wrap { trim: true });
    f.render_widget(prompt, body[0]);

    draw_text_input(
        f,
        body[1],
        &mut app.credential_input,
        "API Key",
        "Enter your API key",
        true,
        true,
    );

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("Enter", "Submit API Key"),
            ("Esc", "Quit"),
            ("Ctrl+C", "Exit App"),
        ])],
    );
}
