use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections::{self, DocSection};
use crate::parser::text;
use crate::parser::ParseRules;

pub const NO_DESCRIPTION: &str = "No description available.";

static H1_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+.+$").unwrap());

/// Produce one descriptive sentence-or-paragraph from the primary document.
/// Strategies are tried in order and the first non-empty normalized result
/// wins; every candidate passes through the text normalizer first.
pub fn extract(rules: &ParseRules, readme: &str) -> String {
    if let Some(found) = from_import_header(rules, readme) {
        return found;
    }

    // Later strategies work on the document with its title line removed.
    let body = H1_LINE_RE.replace(readme, "").into_owned();
    let sections = sections::split_sections(&body);

    from_labeled_section(rules, &sections)
        .or_else(|| from_first_section(&sections))
        .or_else(|| from_first_paragraph(&body))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Apps imported from an external collection carry a fixed header layout:
/// title, blank, "From <source>", blank, one-line description.
fn from_import_header(rules: &ParseRules, readme: &str) -> Option<String> {
    let lines: Vec<&str> = readme.lines().collect();
    if lines.len() < 5 {
        return None;
    }
    let marker_line = lines[2].trim();
    if !rules
        .import_markers
        .iter()
        .any(|marker| marker_line.starts_with(marker.as_str()))
    {
        return None;
    }
    non_empty(text::clean(lines[4].trim()))
}

fn from_labeled_section(rules: &ParseRules, sections: &[DocSection]) -> Option<String> {
    sections
        .iter()
        .find(|s| {
            s.heading.as_deref().is_some_and(|h| {
                let heading = h.trim().to_lowercase();
                rules.description_headings.iter().any(|syn| *syn == heading)
            })
        })
        .and_then(|s| non_empty(text::clean(&s.body)))
}

fn from_first_section(sections: &[DocSection]) -> Option<String> {
    sections
        .iter()
        .find(|s| s.heading.is_some())
        .and_then(|s| non_empty(text::clean(&s.body)))
}

/// First blank-line-separated block that is not a heading, a horizontal rule,
/// or a lone link/image.
fn from_first_paragraph(body: &str) -> Option<String> {
    body.split("\n\n")
        .map(str::trim)
        .find(|p| {
            !p.is_empty()
                && !p.starts_with('#')
                && !p.starts_with("---")
                && !p.starts_with("***")
                && !p.starts_with('[')
                && !p.starts_with('!')
        })
        .and_then(|p| non_empty(text::clean(p)))
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_default(readme: &str) -> String {
        extract(&ParseRules::default(), readme)
    }

    #[test]
    fn import_header_takes_fifth_line() {
        let readme = "# Notes\n\nFrom https://github.com/simonw/tools collection\n\na quick *scratchpad* for notes\n";
        assert_eq!(extract_default(readme), "A quick scratchpad for notes.");
    }

    #[test]
    fn labeled_section_beats_first_section() {
        let readme = "# App\n\n## Setup\nrun make\n\n## Overview\nconverts epub files to markdown\n";
        assert_eq!(extract_default(readme), "Converts epub files to markdown.");
    }

    #[test]
    fn labeled_section_case_insensitive() {
        let readme = "# App\n\n## PROJECT PURPOSE\nbingo card generator for events\n";
        assert_eq!(extract_default(readme), "Bingo card generator for events.");
    }

    #[test]
    fn first_section_fallback() {
        let readme = "# App\n\n## Getting Started\nan exif viewer that runs offline\n";
        assert_eq!(extract_default(readme), "An exif viewer that runs offline.");
    }

    #[test]
    fn first_paragraph_fallback() {
        let readme = "# App\n\n![badge](https://img.example/b.svg)\n\n---\n\nsmall paste bin with preview\n";
        assert_eq!(extract_default(readme), "Small paste bin with preview.");
    }

    #[test]
    fn no_content_yields_fallback_string() {
        assert_eq!(extract_default("# Only A Title\n"), NO_DESCRIPTION);
        assert_eq!(extract_default(""), NO_DESCRIPTION);
    }

    #[test]
    fn well_formed_output() {
        let description = extract_default("# X\n\nlowercase words without a stop\n");
        assert!(description.chars().next().unwrap().is_uppercase());
        assert!(description.ends_with('.'));
    }

    #[test]
    fn bullet_section_reflows_to_sentences() {
        let readme = "# App\n\n## Description\n- converts decks\n- exports apkg\n";
        assert_eq!(extract_default(readme), "Converts decks. Exports apkg.");
    }
}
