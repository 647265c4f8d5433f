use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::colophon::CreditEntry;
use crate::parser::sections;

static NAME_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+(.+)$").unwrap());
static URL_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(https?://\S+)$").unwrap());

static LINK_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-*]\s*\[([^\]]+)\]\(([^)]+)\)(?:\s*[-:–—]\s*(.+))?$").unwrap()
});
static LINK_EMBEDDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*(.+?)\s*\[([^\]]+)\]\(([^)]+)\)\s*(.*)$").unwrap());
static LINK_LAST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-*]\s*(.+?)\s*[-:–—]\s*(.+?)\s*\[([^\]]+)\]\(([^)]+)\)$").unwrap()
});
static NO_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*(.+?)\s*[-:–—]\s+(.+)$").unwrap());
static ABBREV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[eE]-\w").unwrap());

static PROFILE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[([^\]]+)\]\((?:https?://)?(?:www\.)?github\.com/([^/]+)/[^)]+\)").unwrap()
});
static PROFILE_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/([^/]+)/[^\s)\]<>]+").unwrap()
});

/// One recognized single-line credit shape. Variants are tried in fixed
/// priority order; the first match wins and unmatched lines are dropped.
#[derive(Debug)]
enum CreditLine {
    LinkFirst { name: String, url: String, description: String },
    LinkEmbedded { name: String, url: String, description: String },
    LinkLast { name: String, url: String, description: String },
    Plain { name: String, description: String },
}

impl CreditLine {
    fn parse(line: &str) -> Option<CreditLine> {
        if let Some(c) = LINK_FIRST_RE.captures(line) {
            return Some(CreditLine::LinkFirst {
                name: c[1].trim().to_string(),
                url: c[2].trim().to_string(),
                description: c
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            });
        }
        if let Some(c) = LINK_EMBEDDED_RE.captures(line) {
            let prefix = c[1].trim();
            let name = c[2].trim();
            let suffix = c[4].trim();
            let description = [prefix, name, suffix]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            return Some(CreditLine::LinkEmbedded {
                name: name.to_string(),
                url: c[3].trim().to_string(),
                description,
            });
        }
        if let Some(c) = LINK_LAST_RE.captures(line) {
            return Some(CreditLine::LinkLast {
                name: c[1].trim().to_string(),
                description: c[2].trim().to_string(),
                url: c[4].trim().to_string(),
            });
        }
        if let Some(c) = NO_LINK_RE.captures(line) {
            let name = c[1].trim().to_string();
            // A leftover link fragment or a hyphenated abbreviation in the
            // name segment means the separator split the wrong thing.
            if name.contains('[') || name.contains("](") || ABBREV_RE.is_match(&name) {
                return None;
            }
            return Some(CreditLine::Plain {
                name,
                description: c[2].trim().to_string(),
            });
        }
        None
    }

    fn into_entry(self, category: Option<&str>) -> CreditEntry {
        let (name, url, description) = match self {
            CreditLine::LinkFirst { name, url, description }
            | CreditLine::LinkEmbedded { name, url, description }
            | CreditLine::LinkLast { name, url, description } => (name, url, description),
            CreditLine::Plain { name, description } => (name, String::new(), description),
        };
        CreditEntry {
            name,
            url,
            description,
            category: category.map(str::to_string),
        }
    }
}

/// Credits come from the attribution document when it yields any entries;
/// otherwise from code-hosting links found in the primary document.
pub fn extract(credits_doc: Option<&str>, readme: &str) -> Vec<CreditEntry> {
    let mut entries = Vec::new();
    if let Some(doc) = credits_doc {
        if !doc.trim().is_empty() {
            entries = parse_document(doc);
        }
    }
    if entries.is_empty() {
        entries = profile_users(readme)
            .into_iter()
            .map(|(name, url)| CreditEntry {
                name,
                url,
                description: String::new(),
                category: None,
            })
            .collect();
    }
    entries
}

fn parse_document(doc: &str) -> Vec<CreditEntry> {
    let mut entries = Vec::new();
    let mut matched: HashSet<String> = HashSet::new();

    for section in sections::split_sections(doc) {
        let category = section.heading.as_deref();

        // Name/URL bullet pairs take priority: when a section has any,
        // single-line parsing is skipped for that section.
        let pairs = multiline_pairs(&section.body);
        if !pairs.is_empty() {
            for (name, url) in pairs {
                let key = format!("{name}|{url}");
                if matched.insert(key) {
                    entries.push(CreditEntry {
                        name,
                        url,
                        description: String::new(),
                        category: category.map(str::to_string),
                    });
                }
            }
            continue;
        }

        for line in section.body.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if matched.contains(line) {
                continue;
            }
            if let Some(parsed) = CreditLine::parse(line) {
                entries.push(parsed.into_entry(category));
                matched.insert(line.to_string());
            }
        }
    }

    entries
}

/// Consecutive bullets where a name line is immediately followed by a bare
/// URL line.
fn multiline_pairs(body: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(name_caps) = NAME_BULLET_RE.captures(lines[i]) else {
            i += 1;
            continue;
        };
        if let Some(url_caps) = lines.get(i + 1).and_then(|l| URL_BULLET_RE.captures(l)) {
            pairs.push((
                name_caps[1].trim().to_string(),
                url_caps[1].trim().to_string(),
            ));
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

/// `github.com/<user>/<repo...>` references in running text, markdown links
/// first, then bare URLs; one `(user, profile url)` per distinct user.
pub(crate) fn profile_users(text: &str) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut users = Vec::new();

    let from_links = PROFILE_LINK_RE.captures_iter(text).map(|c| c[2].to_string());
    let from_bare = PROFILE_BARE_RE.captures_iter(text).map(|c| c[1].to_string());

    for user in from_links.chain(from_bare) {
        let user = user.trim().trim_end_matches('/').to_string();
        if user.is_empty() || !seen.insert(user.clone()) {
            continue;
        }
        let url = format!("https://github.com/{user}");
        users.push((user, url));
    }
    users
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_only(doc: &str) -> Vec<CreditEntry> {
        extract(Some(doc), "")
    }

    #[test]
    fn link_first_with_description() {
        let entries = parse_only("- [Alice](https://example.com/alice) - built the prototype");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Alice");
        assert_eq!(entries[0].url, "https://example.com/alice");
        assert_eq!(entries[0].description, "built the prototype");
    }

    #[test]
    fn link_first_without_description() {
        let entries = parse_only("- [Alice](https://example.com/alice)");
        assert_eq!(entries[0].name, "Alice");
        assert_eq!(entries[0].description, "");
    }

    #[test]
    fn multiline_pair() {
        let entries = parse_only("- Bob\n    - https://example.com/bob");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Bob");
        assert_eq!(entries[0].url, "https://example.com/bob");
        assert_eq!(entries[0].description, "");
    }

    #[test]
    fn multiline_pairs_suppress_single_line_in_section() {
        let doc = "## Thanks\n- Bob\n    - https://example.com/bob\n- stray - not picked up";
        let entries = parse_only(doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Bob");
        assert_eq!(entries[0].category.as_deref(), Some("Thanks"));
    }

    #[test]
    fn embedded_link_reconstructs_description() {
        let entries = parse_only("- icons by [Feather](https://feathericons.com) project");
        assert_eq!(entries[0].name, "Feather");
        assert_eq!(entries[0].url, "https://feathericons.com");
        assert_eq!(entries[0].description, "icons by Feather project");
    }

    #[test]
    fn plain_name_and_description() {
        let entries = parse_only("- OpenStreetMap - base map data");
        assert_eq!(entries[0].name, "OpenStreetMap");
        assert_eq!(entries[0].url, "");
        assert_eq!(entries[0].description, "base map data");
    }

    #[test]
    fn hyphenated_abbreviation_never_parses() {
        assert!(parse_only("- e-commerce demo").is_empty());
        assert!(parse_only("- e-commerce demo - storefront sample").is_empty());
    }

    #[test]
    fn unrecognized_lines_dropped_silently() {
        let entries = parse_only("just prose\nno bullets here");
        assert!(entries.is_empty());
    }

    #[test]
    fn categories_follow_sections() {
        let doc = "- [Top](https://t.example) - uncategorized\n\n## Libraries\n- [Lib](https://l.example) - parsing";
        let entries = parse_only(doc);
        assert_eq!(entries[0].category, None);
        assert_eq!(entries[1].category.as_deref(), Some("Libraries"));
    }

    #[test]
    fn duplicate_lines_collapse() {
        let doc = "## A\n- [Same](https://s.example) - once\n\n## B\n- [Same](https://s.example) - once";
        let entries = parse_only(doc);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn readme_fallback_when_credits_empty() {
        let readme = "Forked from [upstream](https://github.com/someone/tool) with fixes.";
        let entries = extract(None, readme);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "someone");
        assert_eq!(entries[0].url, "https://github.com/someone");
    }

    #[test]
    fn readme_fallback_dedups_by_user() {
        let readme = "see https://github.com/dev/app and https://github.com/dev/app-docs";
        let entries = extract(Some("   "), readme);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "dev");
    }

    #[test]
    fn bare_www_profile_recognized() {
        let users = profile_users("hosted at www.github.com/host-user/site");
        assert_eq!(users[0].0, "host-user");
        assert_eq!(users[0].1, "https://github.com/host-user");
    }
}
