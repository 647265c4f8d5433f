use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// The resolved primary author of one application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One attributed contribution or dependency. `url` and `description` are
/// empty strings when unknown; `category` is the enclosing heading of the
/// attribution document, when it had one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditEntry {
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One application's structured catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct AppRecord {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub url: String,
    pub credits: Vec<CreditEntry>,
    pub has_credits: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

/// The serialized output collection.
#[derive(Debug, Serialize)]
pub struct Colophon {
    pub generated_at: String,
    pub total_apps: usize,
    pub apps: Vec<AppRecord>,
}

impl Colophon {
    /// Assemble the output: records sorted by app name, stamped with the
    /// completion time in UTC.
    pub fn assemble(mut apps: Vec<AppRecord>) -> Self {
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        Colophon {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            total_apps: apps.len(),
            apps,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing colophon")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> AppRecord {
        AppRecord {
            name: name.to_string(),
            title: "T".to_string(),
            description: "D.".to_string(),
            tags: Vec::new(),
            url: format!("/{name}"),
            credits: Vec::new(),
            has_credits: false,
            author: None,
        }
    }

    #[test]
    fn assemble_sorts_by_name() {
        let colophon = Colophon::assemble(vec![record("zeta"), record("alpha"), record("mid")]);
        let names: Vec<&str> = colophon.apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        assert_eq!(colophon.total_apps, 3);
    }

    #[test]
    fn timestamp_is_utc_iso8601_z() {
        let colophon = Colophon::assemble(Vec::new());
        assert!(colophon.generated_at.ends_with('Z'));
        assert!(colophon.generated_at.contains('T'));
    }

    #[test]
    fn optional_fields_omitted_when_absent() {
        let mut app = record("demo");
        app.credits.push(CreditEntry {
            name: "Lib".to_string(),
            url: String::new(),
            description: String::new(),
            category: None,
        });
        app.has_credits = true;

        let value = serde_json::to_value(&app).unwrap();
        assert!(value.get("author").is_none());
        let credit = &value["credits"][0];
        assert!(credit.get("category").is_none());
        // url and description stay present as empty strings.
        assert_eq!(credit["url"], "");
        assert_eq!(credit["description"], "");
    }

    #[test]
    fn author_url_omitted_when_absent() {
        let mut app = record("demo");
        app.author = Some(Author {
            name: "Ana".to_string(),
            url: None,
        });
        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["author"]["name"], "Ana");
        assert!(value["author"].get("url").is_none());
    }
}
