//! Lyrics value object

use std::fmt;

/// Value object representing a decorated lyric line ready for synthesis.
///
/// Raw model output is flattened to a single line and wrapped in musical
/// note delimiters, so downstream services always see `♪ <text> ♪`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lyrics {
    text: String,
}

impl Lyrics {
    /// Decorate raw model output into a lyric line.
    ///
    /// Embedded newlines are collapsed to spaces before wrapping.
    pub fn from_raw(raw: &str) -> Self {
        let collapsed = raw.replace(['\r', '\n'], " ");
        Self {
            text: format!("♪ {} ♪", collapsed),
        }
    }

    /// Get the decorated lyric text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the decorated lyric text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Lyrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_note_delimiters() {
        let lyrics = Lyrics::from_raw("city lights are calling");
        assert_eq!(lyrics.text(), "♪ city lights are calling ♪");
    }

    #[test]
    fn collapses_newlines_to_spaces() {
        let lyrics = Lyrics::from_raw("first line\nsecond line");
        assert_eq!(lyrics.text(), "♪ first line second line ♪");
    }

    #[test]
    fn collapses_carriage_returns() {
        let lyrics = Lyrics::from_raw("one\r\ntwo\rthree");
        assert!(!lyrics.text().contains('\n'));
        assert!(!lyrics.text().contains('\r'));
    }

    #[test]
    fn never_empty_even_for_empty_input() {
        let lyrics = Lyrics::from_raw("");
        assert!(!lyrics.text().is_empty());
        assert!(lyrics.text().starts_with('♪'));
        assert!(lyrics.text().ends_with('♪'));
    }

    #[test]
    fn display_matches_text() {
        let lyrics = Lyrics::from_raw("hum along");
        assert_eq!(lyrics.to_string(), lyrics.text());
    }
}
