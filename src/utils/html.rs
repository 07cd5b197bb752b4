//! Turn the model's HTML feedback into plain text for the terminal.
//!
//! The output is markdown-flavoured (`- ` bullets, `**bold**`, `### ` headings) so it can be
//! fed straight into [`crate::utils::render_markdown`]. Markup is never executed or passed
//! through; unknown tags are dropped.

use regex::Regex;

lazy_static::lazy_static! {
    static ref SCRIPT_STYLE: Regex = Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>").unwrap();
    static ref LIST_ITEM: Regex = Regex::new(r"(?i)<li[^>]*>").unwrap();
    static ref HEADING_OPEN: Regex = Regex::new(r"(?i)<h[1-6][^>]*>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref BLOCK_TAG: Regex =
        Regex::new(r"(?i)</?(p|div|ul|ol|li|h[1-6]|tr|table|section|article|blockquote)(\s[^>]*)?>").unwrap();
    static ref BOLD_TAG: Regex = Regex::new(r"(?i)</?(strong|b)>").unwrap();
    static ref ITALIC_TAG: Regex = Regex::new(r"(?i)</?(em|i)>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Drop a surrounding ``` fence (```html ... ```), if present.
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();
    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() > 2 && lines[lines.len() - 1].trim() == "```" {
            return lines[1..lines.len() - 1].join("\n");
        }
    }
    trimmed.to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

pub fn html_to_text(html: &str) -> String {
    let text = strip_code_fence(html);
    let text = SCRIPT_STYLE.replace_all(&text, "");
    let text = LIST_ITEM.replace_all(&text, "\n- ");
    let text = HEADING_OPEN.replace_all(&text, "\n### ");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    let text = BOLD_TAG.replace_all(&text, "**");
    let text = ITALIC_TAG.replace_all(&text, "*");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}
