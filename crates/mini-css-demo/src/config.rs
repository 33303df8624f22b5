//! Demo configuration

use std::path::PathBuf;

use clap::Parser;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "MINI_CSS_LOG";

/// Demo configuration options
#[derive(Debug, Clone, Parser)]
#[command(name = "mini-css-demo")]
#[command(version, about = "Add CSS rules from stdin to an in-memory style sheet", long_about = None)]
pub struct Config {
    /// JSON file of `{ "selector", "style" }` rules applied before reading stdin
    #[arg(value_name = "RULES")]
    pub rules_file: Option<PathBuf>,

    /// Selector each line of stdin is added under
    #[arg(short, long, default_value = "body")]
    pub selector: String,

    /// Don't print the sheet's rules when done
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter directive
    #[arg(long, env = LOG_ENV, default_value = "info")]
    pub log_filter: String,
}
