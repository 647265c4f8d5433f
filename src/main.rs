mod catalog;
mod colophon;
mod parser;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::warn;

use catalog::{AppDocs, CatalogConfig};
use colophon::{AppRecord, Colophon};
use parser::ParseRules;

#[derive(Parser)]
#[command(
    name = "colophon",
    about = "Build a structured app catalog from README/CREDITS documentation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every app and write the colophon JSON
    Generate {
        /// Repository root (default: current directory)
        #[arg(long)]
        repo: Option<PathBuf>,
        /// Output path (default: <repo>/colophon.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract in memory and print a compact per-app table
    Overview {
        /// Repository root (default: current directory)
        #[arg(long)]
        repo: Option<PathBuf>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { repo, output } => {
            let repo = repo.unwrap_or_else(|| PathBuf::from("."));
            let output = output.unwrap_or_else(|| repo.join("colophon.json"));
            println!("Scanning repository: {}", repo.display());

            let apps = build_records(&repo)?;
            let colophon = Colophon::assemble(apps);
            colophon.write_json(&output)?;

            println!("\nGenerated colophon: {}", output.display());
            println!("  Total apps: {}", colophon.total_apps);
            Ok(())
        }
        Commands::Overview { repo, limit } => {
            let repo = repo.unwrap_or_else(|| PathBuf::from("."));
            let apps = build_records(&repo)?;
            if apps.is_empty() {
                println!("No apps found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<20} | {:<28} | {:>4} | {:>7} | {:<16}",
                "#", "App", "Title", "Tags", "Credits", "Author"
            );
            println!("{}", "-".repeat(92));
            for (i, app) in apps.iter().take(limit).enumerate() {
                let author = app.author.as_ref().map(|a| a.name.as_str()).unwrap_or("-");
                println!(
                    "{:>3} | {:<20} | {:<28} | {:>4} | {:>7} | {:<16}",
                    i + 1,
                    truncate(&app.name, 20),
                    truncate(&app.title, 28),
                    app.tags.len(),
                    app.credits.len(),
                    truncate(author, 16)
                );
            }

            println!("\n{} apps | url: /<name>", apps.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Discover apps, load their documents, and extract records in parallel.
/// Apps without a primary document are skipped with a notice.
fn build_records(repo: &Path) -> Result<Vec<AppRecord>> {
    let config = CatalogConfig::default();
    let names = catalog::discover(repo, &config)?;
    println!("Found {} apps", names.len());
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let docs = names
        .iter()
        .map(|name| catalog::load_docs(repo, name))
        .collect::<Result<Vec<AppDocs>>>()?;

    let rules = ParseRules::default();
    let pb = ProgressBar::new(docs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let records: Vec<Option<AppRecord>> = docs
        .par_iter()
        .map(|app| {
            let record = app
                .readme
                .as_deref()
                .map(|readme| parser::process_app(&rules, &app.name, readme, app.credits.as_deref()));
            pb.inc(1);
            record
        })
        .collect();
    pb.finish_and_clear();

    let mut apps = Vec::with_capacity(records.len());
    for (doc, record) in docs.iter().zip(records) {
        match record {
            Some(record) => apps.push(record),
            None => warn!(app = %doc.name, "skipped: no README.md"),
        }
    }
    Ok(apps)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
