//! Text measurement and wrapping for the standard Helvetica fonts
//!
//! Widths are approximations of the Helvetica AFM metrics grouped into a few
//! classes, which is close enough to keep wrapped lines inside their column.

use crate::document::Font;

/// Approximate advance width of one character, in 1/1000 em
fn char_width(c: char, font: Font) -> u32 {
    let regular = match c {
        ' ' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 278,
        'i' | 'j' | 'l' => 222,
        'f' | 't' | 'I' | '/' | '[' | ']' | '(' | ')' => 278,
        'r' | '-' => 333,
        'm' | 'M' => 833,
        'w' => 722,
        'W' => 944,
        '@' => 1015,
        'A'..='Z' => 667,
        '0'..='9' => 556,
        'a'..='z' => 556,
        _ => 556,
    };
    match font {
        Font::Regular => regular,
        Font::Bold => regular + regular / 12,
    }
}

/// Width of `text` in points at `size`
pub fn text_width(text: &str, size: f32, font: Font) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, font)).sum();
    units as f32 * size / 1000.0
}

/// Break `text` into lines no wider than `max_width`
///
/// Explicit newlines are kept. Words longer than a line are split by
/// character. Empty input yields no lines.
pub fn wrap_text(text: &str, max_width: f32, size: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, size, font) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, size, font) <= max_width {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if text_width(&current, size, font) > max_width && current.chars().count() > 1
                    {
                        let last = current.pop().unwrap_or(c);
                        lines.push(std::mem::take(&mut current));
                        current.push(last);
                    }
                }
            }
        }
        if !current.is_empty() || !paragraph.trim().is_empty() {
            lines.push(current);
        } else if !lines.is_empty() {
            lines.push(String::new());
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Shorten `text` with a trailing ellipsis so it fits in `max_width`
pub fn truncate_to_width(text: &str, max_width: f32, size: f32, font: Font) -> String {
    if text_width(text, size, font) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if text_width(&format!("{}...", out), size, font) > max_width {
            out.pop();
            break;
        }
    }
    format!("{}...", out.trim_end())
}

/// Encode for a WinAnsi simple font; characters outside Latin-1 become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
