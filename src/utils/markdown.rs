use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap();
    static ref INLINE: Regex = Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`([^`]+)`").unwrap();
}

/// Render light markdown to terminal lines.
/// Supports `#`/`##`/`###` headings, `-`/`*`/numbered lists, **bold**, *italic* and `code`.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    content.lines().map(render_line).collect()
}

fn render_line(line: &str) -> Line<'static> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::from("");
    }

    for prefix in ["### ", "## ", "# "] {
        if let Some(heading) = trimmed.strip_prefix(prefix) {
            return Line::from(Span::styled(
                heading.to_string(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        }
    }

    if let Some(item) = trimmed.strip_prefix("- ").or(trimmed.strip_prefix("* ")) {
        let mut spans = vec![Span::from("  • ")];
        spans.extend(parse_inline(item));
        return Line::from(spans);
    }

    if let Some(caps) = NUMBERED_ITEM.captures(trimmed) {
        let mut spans = vec![Span::from(format!("  {}. ", &caps[1]))];
        spans.extend(parse_inline(&caps[2]));
        return Line::from(spans);
    }

    Line::from(parse_inline(line))
}

fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }

        let (content, modifier) = if let Some(bold) = caps.get(1) {
            (bold.as_str(), Modifier::BOLD)
        } else if let Some(italic) = caps.get(2) {
            (italic.as_str(), Modifier::ITALIC)
        } else if let Some(code) = caps.get(3) {
            (code.as_str(), Modifier::DIM)
        } else {
            (whole.as_str(), Modifier::empty())
        };
        spans.push(Span::styled(
            content.to_string(),
            Style::default().add_modifier(modifier),
        ));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::from(text[last..].to_string()));
    }
    if spans.is_empty() {
        spans.push(Span::from(text.to_string()));
    }
    spans
}
