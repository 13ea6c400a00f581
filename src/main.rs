//! # procwatch - Terminal dashboard for a process telemetry backend
//!
//! Polls a monitoring backend every two seconds, charts CPU and memory of
//! the watched process, raises a debounced alarm on anomalies, and lets the
//! user close the offending process from the alert popup.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

mod alerts;
mod app;
mod config;
pub mod constants;
mod metrics;
mod models;
mod monitor;
mod remediation;
mod session;
mod telemetry;
mod ui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use constants::{data_dir, DEFAULT_LOG_FILTER, LOG_FILE_NAME};

/// procwatch - process telemetry dashboard
#[derive(Parser, Debug)]
#[command(name = "procwatch", version, about = "A terminal dashboard for process anomaly alerts")]
struct Cli {
    /// Backend base URL (serves /data and /kill_process)
    #[arg(long, short = 'u', value_name = "URL")]
    url: Option<String>,

    /// Color theme (default, nord, gruvbox)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// UI language (en, es)
    #[arg(long, short = 'l', value_name = "LANG")]
    lang: Option<String>,

    /// Start with the alarm bell silenced
    #[arg(long)]
    mute: bool,

    /// Enable Prometheus metrics endpoint on the given address (e.g. "0.0.0.0:9100")
    #[arg(long, value_name = "ADDR")]
    prometheus: Option<String>,
}

/// Route tracing output to a log file. The terminal is owned by the TUI.
fn init_logging() -> Result<WorkerGuard> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging()?;

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(ref url) = cli.url {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            config.server_url = url.to_string();
        }
    }
    if let Some(ref theme_name) = cli.theme {
        config.theme = theme_name.clone();
    }
    if let Some(ref lang) = cli.lang {
        config.lang = lang.clone();
    }
    if cli.mute {
        config.alarm_sound = false;
    }

    // Set UI language (CLI > config > default "en")
    rust_i18n::set_locale(&config.lang);

    let mut app = app::App::new(&config, cli.prometheus.as_deref())?;
    app.run().await
}
