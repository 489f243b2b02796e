//! Command-line argument definition and processing.

use clap::Parser;

use crate::theme::{MAX_PER_PAGE, Settings};

/// Anisea - A fast, friendly TUI for browsing the `AniList` anime catalog
#[derive(Parser, Debug)]
#[command(name = "anisea")]
#[command(version)]
#[command(about = "A fast, friendly TUI for browsing the AniList anime catalog", long_about = None)]
pub struct Args {
    /// Start with this search term instead of the trending listing
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of entries requested per page (1-50)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PER_PAGE)))]
    pub per_page: Option<u32>,

    /// GraphQL endpoint of the catalog
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print results to stdout instead of starting the TUI
    #[arg(short, long)]
    pub list: bool,

    /// Number of pages to print with --list
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Run the TUI without a terminal (for tests and CI)
    #[arg(long, hide = true)]
    pub headless: bool,
}

impl Args {
    /// What: Apply command-line overrides on top of the loaded settings.
    ///
    /// Inputs:
    /// - `settings`: Settings read from `settings.conf` (or defaults).
    ///
    /// Output:
    /// - `settings` updated in place; flags that were not given leave the configured value.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(n) = self.per_page {
            tracing::debug!(per_page = n, "[Config] per_page overridden from CLI");
            settings.per_page = n;
        }
        if let Some(url) = self.endpoint.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            tracing::debug!(endpoint = %url, "[Config] api_endpoint overridden from CLI");
            settings.api_endpoint = url.to_string();
        }
    }
}
