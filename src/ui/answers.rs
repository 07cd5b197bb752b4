use super::{draw_header, draw_help, draw_text_input, help_line};
use crate::app::App;
use crate::ui::layout::calculate_answer_chunks;
use crate::utils::truncate_string;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw_answers(f: &mut Frame, app: &mut App) {
    let layout = calculate_answer_chunks(f.area());

    let total = app.session.questions.len();
    let answered = (0..total)
        .filter(|i| !app.session.answer(*i).trim().is_empty())
        .count();
    let progress = format!(
        "Question {} / {} - {} answered",
        app.current_question + 1,
        total,
        answered
    );
    draw_header(f, layout.header_area, &progress);

    let question_text = app
        .session
        .questions
        .get(app.current_question)
        .map(String::as_str)
        .unwrap_or_default();
    let question = Paragraph::new(Text::from(question_text))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    let editable = !app.session.grading_in_progress;
    draw_text_input(
        f,
        layout.answer_area,
        &mut app.answer_input,
        "Your Answer",
        "[Type your answer here...]",
        editable,
        false,
    );

    // Overview of all questions; blank answers are marked
    let label_width = layout.overview_area.width.saturating_sub(8) as usize;
    let items: Vec<ListItem> = app
        .session
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let has_answer = !app.session.answer(i).trim().is_empty();
            let marker = if has_answer { "✓" } else { " " };
            let style = if has_answer {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(format!(
                "{} {}. {}",
                marker,
                i + 1,
                truncate_string(q, label_width)
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Questions"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default();
    state.select(Some(app.current_question));
    f.render_stateful_widget(list, layout.overview_area, &mut state);

    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[
                ("↑/↓", "Select Question"),
                ("Enter", "Next"),
            ]),
            help_line(&[
                ("Ctrl+G", "Check Answers"),
                ("Ctrl+C", "Exit App"),
            ]),
        ],
    );
}
