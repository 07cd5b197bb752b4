use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ScreenLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct SourceLayout {
    pub header_area: Rect,
    pub text_area: Rect,
    pub path_area: Rect,
    pub start_page_area: Rect,
    pub end_page_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct AnswerLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub answer_area: Rect,
    pub overview_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_screen_chunks(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

pub fn calculate_source_chunks(area: Rect) -> SourceLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    // PDF row: path | start | end
    let pdf_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
        ])
        .split(chunks[2]);

    SourceLayout {
        header_area: chunks[0],
        text_area: chunks[1],
        path_area: pdf_chunks[0],
        start_page_area: pdf_chunks[1],
        end_page_area: pdf_chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_answer_chunks(area: Rect) -> AnswerLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main[0]);

    AnswerLayout {
        header_area: chunks[0],
        question_area: left[0],
        answer_area: left[1],
        overview_area: main[1],
        help_area: chunks[2],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
