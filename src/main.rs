//! Anisea binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use anisea::{app, args, sources, theme};
use clap::Parser;

/// Log line timestamp in local time.
struct AniseaTimer;

impl tracing_subscriber::fmt::time::FormatTime for AniseaTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&anisea::util::log_timestamp())
    }
}

/// Keeps the non-blocking log writer alive until exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing, writing to `~/.config/anisea/logs/anisea.log`.
///
/// Inputs:
/// - `level`: Fallback filter when `RUST_LOG` is not set.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = theme::logs_dir();
    log_path.push("anisea.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AniseaTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: init stderr logger to avoid blocking startup
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(AniseaTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = args::Args::parse();
    init_logging(&args::determine_log_level(&cli));

    let mut settings = theme::settings();
    cli.apply_to(&mut settings);
    tracing::info!(
        endpoint = %settings.api_endpoint,
        per_page = settings.per_page,
        list = cli.list,
        "Anisea starting"
    );

    if cli.list {
        let code = match run_list(&cli, &settings).await {
            Ok(n) => {
                tracing::info!(printed = n, "listing finished");
                0
            }
            Err(err) => {
                eprintln!("anisea: {err}");
                tracing::error!(error = %err, "listing failed");
                1
            }
        };
        std::process::exit(code);
    }

    let options = app::RunOptions {
        settings,
        initial_search: cli.search.clone(),
        headless: cli.headless,
    };
    if let Err(err) = app::run(options).await {
        eprintln!("anisea: {err}");
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("Anisea exited");
}

/// What: Build the catalog client and print `--pages` pages to stdout.
async fn run_list(
    cli: &args::Args,
    settings: &theme::Settings,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let client = sources::AniListClient::new(
        settings.api_endpoint.clone(),
        std::time::Duration::from_secs(settings.request_timeout_secs),
    )?;
    let mut stdout = std::io::stdout().lock();
    args::handle_list(&client, settings, cli.search.as_deref(), cli.pages, &mut stdout).await
}
