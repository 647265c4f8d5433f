use std::sync::LazyLock;

use regex::Regex;

use crate::colophon::Author;
use crate::parser::extract::credits;
use crate::parser::sections;

static AUTHOR_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^)]+)\)").unwrap());
static PROFILE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/([^/\s)]+)").unwrap());
static BYLINE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Created (by|with\s+\S+\s+by)|Written by|Author:?)\s*").unwrap()
});

/// Resolve the single primary author. Precedence: an Author(s) section of the
/// attribution document, then author-shaped content anywhere in it, then the
/// first code-hosting user credited by the primary document.
pub fn resolve(credits_doc: Option<&str>, readme: &str) -> Option<Author> {
    if let Some(doc) = credits_doc.filter(|d| !d.trim().is_empty()) {
        let found = authors_section(doc)
            .and_then(|body| parse_content(&body))
            .or_else(|| parse_content(doc));
        if found.is_some() {
            return found;
        }
    }

    credits::profile_users(readme)
        .into_iter()
        .next()
        .map(|(name, url)| Author {
            name,
            url: Some(url),
        })
}

fn authors_section(doc: &str) -> Option<String> {
    sections::split_sections(doc)
        .into_iter()
        .find(|s| {
            s.heading.as_deref().is_some_and(|h| {
                let heading = h.trim();
                heading.eq_ignore_ascii_case("author") || heading.eq_ignore_ascii_case("authors")
            })
        })
        .map(|s| s.body)
}

/// Three sub-strategies in order: a markdown link, a profile URL, then the
/// first non-empty line with common byline prefixes stripped.
fn parse_content(content: &str) -> Option<Author> {
    if let Some(c) = AUTHOR_LINK_RE.captures(content) {
        return Some(Author {
            name: c[1].trim().to_string(),
            url: Some(c[2].trim().to_string()),
        });
    }

    if let Some(c) = PROFILE_URL_RE.captures(content) {
        let user = c[1].trim().trim_end_matches('/');
        if !user.is_empty() {
            return Some(Author {
                name: user.to_string(),
                url: Some(format!("https://github.com/{user}")),
            });
        }
    }

    let first_line = content.lines().next().unwrap_or("").trim();
    let name = BYLINE_PREFIX_RE.replace(first_line, "").trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(Author { name, url: None })
    }
}

// ── Tests ──
