//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape MarkdownV2 special characters
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '='
                | '|' | '{' | '}' | '.' | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the MarkdownV2 caption shown on event cards
pub fn event_caption(title: &str, description: &str) -> String {
    format!("*{}*\n\n{}", escape_markdown(title), escape_markdown(description))
}

/// Parse the last whitespace-separated token of a command argument as an id
pub fn parse_trailing_id(text: &str) -> Option<i64> {
    text.split_whitespace().last()?.parse::<i64>().ok()
}

/// Parse the numeric suffix of a callback payload like `event_select_12`
pub fn parse_callback_id(data: &str, prefix: &str) -> Option<i64> {
    data.strip_prefix(prefix)?.parse::<i64>().ok()
}

/// Render an optional profile field, `-` when absent or blank
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Calculate pagination offset for 1-based pages
pub fn calculate_offset(page: u32, page_size: u32) -> i64 {
    page.saturating_sub(1) as i64 * page_size as i64
}
