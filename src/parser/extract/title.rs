use std::sync::LazyLock;

use regex::Regex;

use crate::parser::text;

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// First top-level heading of the document, else a display form of the app
/// identifier. Always returns a non-empty string.
pub fn extract(readme: &str, fallback: &str) -> String {
    if let Some(caps) = H1_RE.captures(readme) {
        let title = caps[1].trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }
    text::title_case(&fallback.replace(['-', '_'], " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_h1_wins() {
        let readme = "badge line\n# Bingo Creator\n# Second Heading\ntext";
        assert_eq!(extract(readme, "bingo-creator"), "Bingo Creator");
    }

    #[test]
    fn h2_is_not_a_title() {
        assert_eq!(extract("## Overview\ntext", "md-converter"), "Md Converter");
    }

    #[test]
    fn fallback_from_identifier() {
        assert_eq!(extract("no headings here", "anki_deck-builder"), "Anki Deck Builder");
    }
}
