use std::sync::LazyLock;

use regex::Regex;

static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##\s+(.+?)\s*$").unwrap());

/// One level-2 section of a document. Text before the first `##` heading
/// becomes a headingless preamble; deeper headings stay inside the body.
#[derive(Debug, Clone)]
pub struct DocSection {
    pub heading: Option<String>,
    pub body: String,
}

/// Split a document at its `##` headings, in document order.
pub fn split_sections(text: &str) -> Vec<DocSection> {
    let mut sections = Vec::new();
    let mut heading: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = H2_RE.captures(line) {
            flush(&mut sections, heading.take(), &mut body);
            heading = Some(caps[1].to_string());
        } else {
            body.push(line);
        }
    }
    flush(&mut sections, heading, &mut body);
    sections
}

fn flush(sections: &mut Vec<DocSection>, heading: Option<String>, body: &mut Vec<&str>) {
    let text = body.join("\n").trim().to_string();
    body.clear();
    // An empty preamble is noise; an empty headed section is still a section.
    if heading.is_none() && text.is_empty() {
        return;
    }
    sections.push(DocSection { heading, body: text });
}

// ── Tests ──
