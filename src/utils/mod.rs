pub mod html;
pub mod markdown;

pub use html::html_to_text;
pub use markdown::render_markdown;

use ratatui::text::Text;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten to at most `max_len` characters, ending in "..." when cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        // No room for an ellipsis
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Simulate how text wraps with trimming (matching ratatui Wrap { trim: true } behavior)
/// Handles both explicit newlines (\n) and automatic wrapping at max_width
/// Returns a vector of (line_text, start_byte, end_byte) for each visual line
fn simulate_wrapped_lines(text: &str, max_width: usize) -> Vec<(String, usize, usize)> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;
    let mut line_start_idx = 0;

    for (byte_idx, ch) in text.char_indices() {
        if ch == '\n' {
            let trimmed = current_line.trim_end().to_string();
            lines.push((trimmed, line_start_idx, byte_idx));

            current_line = String::new();
            current_width = 0;
            line_start_idx = byte_idx + 1;
        } else {
            let char_width = ch.width().unwrap_or(1);

            if current_width + char_width > max_width && current_width > 0 {
                let trimmed = current_line.trim_end().to_string();
                lines.push((trimmed, line_start_idx, byte_idx));

                current_line = ch.to_string();
                current_width = char_width;
                line_start_idx = byte_idx;
            } else {
                current_line.push(ch);
                current_width += char_width;
            }
        }
    }

    if !current_line.is_empty() || text.ends_with('\n') {
        let trimmed = current_line.trim_end().to_string();
        lines.push((trimmed, line_start_idx, text.len()));
    }

    lines
}

/// Line and display column of a cursor (given as a byte offset) within wrapped text.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor_index == 0 {
        return (0, 0);
    }

    let wrapped_lines = simulate_wrapped_lines(text, max_width);

    for (line_idx, (_, start_idx, end_idx)) in wrapped_lines.iter().enumerate() {
        if cursor_index >= *start_idx && cursor_index <= *end_idx {
            let col = text
                .get(*start_idx..cursor_index)
                .map(UnicodeWidthStr::width)
                .unwrap_or(0);
            return (line_idx, col);
        }
    }

    // Cursor sits past the last visual line
    if let Some((last_text, _, last_end)) = wrapped_lines.last()
        && cursor_index >= *last_end
    {
        return (wrapped_lines.len() - 1, last_text.width());
    }

    (0, 0)
}

/// Rough number of rows `text` occupies when wrapped to `width` columns.
pub fn estimate_text_height(text: &Text, width: usize) -> usize {
    if width == 0 {
        return text.lines.len();
    }
    text.lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height
        .saturating_sub(visible_height)
        .min(u16::MAX as usize) as u16
}
