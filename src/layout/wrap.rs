//! Greedy word wrap over an arbitrary width measurement.
//!
//! Text is split into paragraphs on `\n` first, so explicit breaks always survive. Inside a
//! paragraph words are appended to a line buffer one at a time; before each append the
//! *prospective* line (buffer + space + word) is measured. When it is wider than `max_width` and
//! the buffer already holds a word, the buffer is flushed and the word starts the next line. A
//! word that is wider than `max_width` on its own is never split.
//!
//! The candidate is measured without a trailing space, and flushed lines never end in one.

use crate::foundation::error::PosterResult;

/// Wrap `text` into lines no wider than `max_width` (except unsplittable single words).
///
/// `measure` returns the rendered width of a candidate line. An empty paragraph yields an empty
/// line, matching how a blank line in the editor still advances the cursor.
pub fn wrap_paragraphs<F>(text: &str, max_width: f32, mut measure: F) -> PosterResult<Vec<String>>
where
    F: FnMut(&str) -> PosterResult<f32>,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }

            let candidate = format!("{line} {word}");
            let width = measure(&candidate)?;
            if width > max_width {
                tracing::trace!(width, max_width, line = %line, "wrap");
                lines.push(std::mem::replace(&mut line, word.to_owned()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
