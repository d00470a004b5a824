//! Word wrapping over the bitmap-font metrics.

use slate_types::backend::text_width;

/// Greedily wrap `text` into lines no wider than `max_width` pixels at
/// `font_size`. A word wider than the limit gets a line of its own rather
/// than being split.
pub fn word_wrap(text: &str, max_width: u32, font_size: u16) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
