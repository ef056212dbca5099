//! Glyph-prefixed labels.
//!
//! Card titles and floating box texts carry a small icon glyph in front of
//! the text. The glyph is kept as its own field so replacing it never eats
//! into user-authored text.

use serde::{Deserialize, Serialize};

/// A text label with an optional leading glyph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Label {
    pub glyph: Option<String>,
    pub text: String,
}

impl Label {
    /// Create a label with a glyph.
    pub fn new(glyph: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            glyph: Some(glyph.into()),
            text: text.into(),
        }
    }

    /// Create a label without a glyph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            glyph: None,
            text: text.into(),
        }
    }

    /// Split a rendered `"<glyph> <text>"` string.
    ///
    /// The first whitespace-delimited token is taken as the glyph when it is
    /// followed by whitespace; otherwise the whole string is text.
    pub fn from_display(s: &str) -> Self {
        match s.split_once(char::is_whitespace) {
            Some((token, rest)) if !token.is_empty() => Self::new(token, rest),
            _ => Self::plain(s),
        }
    }

    /// Render as `"<glyph> <text>"`, or just the text without a glyph.
    pub fn display(&self) -> String {
        match &self.glyph {
            Some(glyph) => format!("{} {}", glyph, self.text),
            None => self.text.clone(),
        }
    }

    /// Replace the glyph from an icon input value.
    ///
    /// The value is trimmed and cut to `max_chars` characters. Blank input
    /// leaves the label untouched. Returns whether the glyph was set.
    pub fn set_glyph(&mut self, input: &str, max_chars: usize) -> bool {
        let glyph: String = input.trim().chars().take(max_chars).collect();
        if glyph.is_empty() {
            return false;
        }
        self.glyph = Some(glyph);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacing_glyph_keeps_text() {
        let mut title = Label::from_display("✨ Uusi otsikko");
        assert!(title.set_glyph("🌿", 2));
        assert_eq!(title.display(), "🌿 Uusi otsikko");

        assert!(title.set_glyph(" 🔥 ", 2));
        assert_eq!(title.display(), "🔥 Uusi otsikko");
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut title = Label::new("✨", "Otsikko");
        assert!(!title.set_glyph("   ", 2));
        assert_eq!(title.glyph.as_deref(), Some("✨"));
    }

    #[test]
    fn test_glyph_is_truncated() {
        let mut title = Label::plain("Otsikko");
        title.set_glyph("abcdef", 2);
        assert_eq!(title.display(), "ab Otsikko");
    }

    #[test]
    fn test_from_display_without_glyph() {
        let label = Label::from_display("Otsikko");
        assert_eq!(label.glyph, None);
        assert_eq!(label.text, "Otsikko");

        let label = Label::from_display(" leading space");
        assert_eq!(label.glyph, None);
        assert_eq!(label.text, " leading space");
    }
}
