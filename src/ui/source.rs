use super::{draw_header, draw_help, draw_text_input, help_line};
use crate::app::{App, SourceField};
use crate::ui::layout::calculate_source_chunks;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_source(f: &mut Frame, app: &mut App) {
    let layout = calculate_source_chunks(f.area());
    draw_header(f, layout.header_area, "TestMe - Study Material");

    let focus = app.source_focus;
    draw_text_input(
        f,
        layout.text_area,
        &mut app.source_input,
        "Source Text",
        "Enter your text here, or extract it from a PDF below",
        focus == SourceField::Text,
        false,
    );
    draw_text_input(
        f,
        layout.path_area,
        &mut app.pdf_path_input,
        "PDF File",
        "/path/to/document.pdf",
        focus == SourceField::PdfPath,
        false,
    );
    draw_text_input(
        f,
        layout.start_page_area,
        &mut app.start_page_input,
        "Start Page",
        "1",
        focus == SourceField::StartPage,
        false,
    );
    draw_text_input(
        f,
        layout.end_page_area,
        &mut app.end_page_input,
        "End Page",
        "1",
        focus == SourceField::EndPage,
        false,
    );

    let status = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        )),
        None if app.session.source_text.trim().is_empty() => Line::from(Span::styled(
            "Type or extract some text to generate a test from.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        None => Line::from(Span::styled(
            format!(
                "{} characters ready",
                app.session.source_text.chars().count()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status), layout.status_area);

    let enter_label = if focus == SourceField::Text {
        "New Line"
    } else {
        "Extract Text from PDF"
    };
    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[
                ("Tab", "Next Field"),
                ("Enter", enter_label),
            ]),
            help_line(&[
                ("Ctrl+P", "Extract PDF"),
                ("Ctrl+G", "Generate Test"),
                ("Ctrl+C", "Exit App"),
            ]),
        ],
    );
}
