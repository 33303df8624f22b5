//! mini-css demo - Main Entry Point
//!
//! Applies an optional JSON rules file, then adds one rule per line of
//! stdin under the configured selector and prints the resulting sheet.

mod config;

use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use mini_css::{MemoryDocument, StyleBody, StyleSheetManager};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use config::Config;

/// One entry of the rules file
#[derive(Debug, Deserialize)]
struct RuleEntry {
    selector: String,
    style: serde_json::Value,
}

fn load_rules(path: &Path) -> anyhow::Result<Vec<RuleEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("mini-css {} demo", mini_css::VERSION);

    let mut css = StyleSheetManager::new(MemoryDocument::new());
    css.create_style_sheet()?;

    if let Some(path) = &config.rules_file {
        for entry in load_rules(path)? {
            let body = StyleBody::try_from(entry.style)
                .with_context(|| format!("style for `{}`", entry.selector))?;
            css.add(&entry.selector, body)?;
        }
        tracing::info!("Applied rules from {}", path.display());
    }

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        // A bad line is reported and skipped, like the page's text box
        if let Err(e) = css.add(&config.selector, text) {
            tracing::warn!("Skipping `{}`: {}", text, e);
        }
    }

    if !config.quiet {
        for rule in css.get_rules() {
            println!("{}", rule);
        }
    }

    Ok(())
}
