use std::sync::LazyLock;

use regex::{Captures, Regex};

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_]{1,2}([^*_]+)[*_]{1,2}").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static HEADING_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+.*$").unwrap());
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "[\u{1F600}-\u{1F64F}\u{1F300}-\u{1F5FF}\u{1F680}-\u{1F6FF}\
         \u{1F1E0}-\u{1F1FF}\u{2702}-\u{27B0}\u{24C2}-\u{1F251}\
         \u{1F900}-\u{1F9FF}\u{1FA00}-\u{1FA6F}\u{1FA70}-\u{1FAFF}]",
    )
    .unwrap()
});
static LEAD_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+([A-Za-z])").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*[-*]\s+([A-Za-z])").unwrap());
static DOUBLE_STOP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\.\s*\.\s*").unwrap());

/// Strip markdown decoration from free text and reflow it into clean
/// sentences: links become their label, emphasis and code markers are
/// unwrapped, heading lines and emoji are dropped, and bullet items turn into
/// ". "-separated sentences. Idempotent on already-clean text.
pub fn clean(raw: &str) -> String {
    let text = LINK_RE.replace_all(raw, "$1");
    let text = EMPHASIS_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    let text = HEADING_LINE_RE.replace_all(&text, "");
    let text = EMOJI_RE.replace_all(&text, "");
    // First bullet keeps its position, later bullets become sentence breaks.
    let text = LEAD_BULLET_RE.replace(&text, |c: &Captures| c[1].to_uppercase());
    let text = BULLET_RE.replace_all(&text, |c: &Captures| format!(". {}", c[1].to_uppercase()));
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = DOUBLE_STOP_RE.replace_all(&text, ". ");
    finish(text.trim().to_string())
}

fn finish(mut text: String) -> String {
    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        if !first.is_uppercase() {
            let mut capitalized: String = first.to_uppercase().collect();
            capitalized.push_str(chars.as_str());
            text = capitalized;
        }
    }
    if !text.is_empty() && !text.ends_with('.') {
        text.push('.');
    }
    text
}

/// Display casing for titles and tags: every alphabetic run starts uppercase
/// and continues lowercase, so "next.js" becomes "Next.Js".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

// ── Tests ──
