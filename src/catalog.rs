use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Immutable discovery configuration: directory names that are never apps.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub exclude_dirs: HashSet<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let exclude_dirs = [
            "templates",
            "nginx",
            ".git",
            "__pycache__",
            "node_modules",
            ".venv",
            "venv",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        CatalogConfig { exclude_dirs }
    }
}

/// One application's raw documents. A missing file is `None`; the pipeline
/// decides what absence means.
#[derive(Debug, Clone)]
pub struct AppDocs {
    pub name: String,
    pub readme: Option<String>,
    pub credits: Option<String>,
}

/// List application directories one level under `<repo>/apps`, sorted by
/// name. A directory counts as an app when it is not hidden, not excluded,
/// and carries a Dockerfile or a README.md. A missing `apps/` directory
/// yields an empty catalog.
pub fn discover(repo_root: &Path, config: &CatalogConfig) -> Result<Vec<String>> {
    let apps_dir = repo_root.join("apps");
    if !apps_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries =
        fs::read_dir(&apps_dir).with_context(|| format!("listing {}", apps_dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", apps_dir.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if name.starts_with('.') || config.exclude_dirs.contains(&name) {
            continue;
        }
        if path.join("Dockerfile").exists() || path.join("README.md").exists() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Read the two documents for one app. Not-found is a valid state; any other
/// read failure aborts the run with the offending path.
pub fn load_docs(repo_root: &Path, name: &str) -> Result<AppDocs> {
    let app_dir = repo_root.join("apps").join(name);
    Ok(AppDocs {
        name: name.to_string(),
        readme: read_optional(&app_dir.join("README.md"))?,
        credits: read_optional(&app_dir.join("CREDITS.md"))?,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

// ── Tests ──
