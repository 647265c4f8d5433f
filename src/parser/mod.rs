pub mod extract;
pub mod sections;
pub mod text;

use regex::Regex;

use crate::colophon::AppRecord;

/// Technology catalog: (pattern, canonical tag) rows matched against the
/// lower-cased document. Order matters: a versioned or otherwise more
/// specific pattern comes before a generic one mapping to the same canonical
/// tag, so the generic row cannot re-add it.
const TECH_CATALOG: &[(&str, &str)] = &[
    // Web frameworks
    (r"next\.js\s*19?", "Next.js"),
    (r"react\s*19?", "React"),
    (r"tailwind\s*css\s*v?4", "Tailwind CSS"),
    (r"tailwind\s*css", "Tailwind CSS"),
    // Languages
    (r"typescript", "TypeScript"),
    (r"golang|\bgo\b", "Go"),
    // Platforms/Tools
    (r"docker", "Docker"),
    (r"oauth\s*2?", "OAuth"),
    (r"github\s*api", "GitHub API"),
    (r"\bbun\b", "Bun"),
    (r"node\.js", "Node.js"),
    // Processing/Conversion
    (r"optical\s*character\s*recognition|ocr", "OCR"),
    (r"tesseract", "Tesseract"),
    (r"pdf\.js", "PDF.js"),
    (r"jsqr", "jsQR"),
    (r"readability", "Readability"),
    (r"speechsynthesis|tts", "SpeechSynthesis"),
    (r"graphviz", "Graphviz"),
    (r"\bdot\b", "DOT"),
    // Formats
    (r"markdown|gfm", "Markdown"),
    (r"epub", "EPUB"),
    (r"exif", "EXIF"),
    (r"qr\s*code", "QR"),
    (r"yaml", "YAML"),
    (r"json", "JSON"),
    (r"webassembly|wasm", "WebAssembly"),
];

pub struct TechPattern {
    pub pattern: Regex,
    pub tag: &'static str,
}

/// Immutable extraction configuration, built once per run and shared across
/// worker threads. Heading synonyms are stored lower-cased.
pub struct ParseRules {
    pub description_headings: Vec<String>,
    pub tag_headings: Vec<String>,
    pub import_markers: Vec<String>,
    pub max_tags: usize,
    pub tech_catalog: Vec<TechPattern>,
}

impl Default for ParseRules {
    fn default() -> Self {
        ParseRules {
            description_headings: ["project purpose", "description", "overview", "about"]
                .map(String::from)
                .to_vec(),
            tag_headings: ["tags", "keywords", "categories"].map(String::from).to_vec(),
            import_markers: vec!["From https://github.com/simonw/tools".to_string()],
            max_tags: 10,
            tech_catalog: TECH_CATALOG
                .iter()
                .map(|&(pattern, tag)| TechPattern {
                    pattern: Regex::new(pattern).unwrap(),
                    tag,
                })
                .collect(),
        }
    }
}

/// Run the extractor sequence over one application's documents and assemble
/// its record.
pub fn process_app(
    rules: &ParseRules,
    name: &str,
    readme: &str,
    credits_doc: Option<&str>,
) -> AppRecord {
    let title = extract::title::extract(readme, name);
    let description = extract::description::extract(rules, readme);
    let tags = extract::tags::extract(rules, readme);
    let credits = extract::credits::extract(credits_doc, readme);
    let author = extract::author::resolve(credits_doc, readme);
    let has_credits = !credits.is_empty();

    AppRecord {
        name: name.to_string(),
        title,
        description,
        tags,
        url: format!("/{name}"),
        credits,
        has_credits,
        author,
    }
}

// ── Tests ──
