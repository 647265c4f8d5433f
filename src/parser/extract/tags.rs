use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections;
use crate::parser::text;
use crate::parser::ParseRules;

static BADGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]+)\]").unwrap());
static BULLET_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s*(.+)$").unwrap());

/// Merge explicit tag declarations, badge alt-texts, and technology-catalog
/// hits into one deduplicated display list of at most `rules.max_tags`
/// entries, in discovery order.
pub fn extract(rules: &ParseRules, readme: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(body) = tags_section(rules, readme) {
        candidates.extend(section_items(&body));
    }

    for caps in BADGE_RE.captures_iter(readme) {
        let alt = caps[1].to_string();
        if !alt.is_empty() && !candidates.contains(&alt) {
            candidates.push(alt);
        }
    }

    let lowered = readme.to_lowercase();
    for tech in &rules.tech_catalog {
        if tech.pattern.is_match(&lowered) && !candidates.iter().any(|c| c == tech.tag) {
            candidates.push(tech.tag.to_string());
        }
    }

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for candidate in candidates {
        let key = candidate.trim().to_lowercase();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        tags.push(text::title_case(&key));
        if tags.len() == rules.max_tags {
            break;
        }
    }
    tags
}

fn tags_section(rules: &ParseRules, readme: &str) -> Option<String> {
    sections::split_sections(readme)
        .into_iter()
        .find(|s| {
            s.heading.as_deref().is_some_and(|h| {
                let heading = h
                    .trim_end_matches(|c: char| c == ':' || c.is_whitespace())
                    .to_lowercase();
                rules.tag_headings.iter().any(|syn| *syn == heading)
            })
        })
        .map(|s| s.body)
}

/// Section items are one bullet per line, or comma-separated runs.
fn section_items(body: &str) -> Vec<String> {
    let mut items = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = BULLET_ITEM_RE.captures(line) {
            push_item(&mut items, &caps[1]);
        } else {
            for piece in line.split(',') {
                push_item(&mut items, piece);
            }
        }
    }
    items
}

fn push_item(items: &mut Vec<String>, raw: &str) {
    let item = raw.trim();
    if !item.is_empty() && !item.starts_with('#') {
        items.push(item.to_string());
    }
}

// ── Tests ──
