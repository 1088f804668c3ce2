//! Logging setup and console status output.
//!
//! Library code logs through the `log` macros. [`init`] installs a
//! `tracing` subscriber that receives those records:
//! - a human-readable stderr layer (stdout is reserved for JSON results)
//! - an optional JSON file layer with daily rolling files
//!
//! `RUST_LOG` overrides the configured level.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use console::style;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "deckscope.log";

// ============================================================================
// Logging Initialization
// ============================================================================

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system.
///
/// When `log_dir` is set, JSON logs are also written there with daily
/// rotation. The returned `WorkerGuard` must be kept alive for the
/// duration of the program so buffered file logs are flushed on exit.
pub fn init(level: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .with_filter(env_filter(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
            }
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_filter(env_filter(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
        return guard;
    }

    // Redirect standard `log` macros to `tracing`
    if let Err(e) = tracing_log::LogTracer::init() {
        log::debug!("LogTracer already installed: {}", e);
    }

    if let Some(dir) = log_dir {
        log::debug!("Writing JSON logs to {}", dir.join(LOG_FILE_PREFIX).display());
        let dir = dir.to_path_buf();
        std::thread::spawn(move || compress_old_logs(&dir));
    }

    guard
}

/// Gzip rolled-over log files from previous days.
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prefix = format!("{LOG_FILE_PREFIX}.");

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with(&prefix) || name.ends_with(&today_suffix) || name.ends_with(".gz") {
            continue;
        }

        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {}", path.display()),
            Err(e) => log::warn!("Failed to compress old log {}: {}", path.display(), e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path: PathBuf = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;
    fs::remove_file(path)
}

// ============================================================================
// Console Output Utilities
// ============================================================================

/// Print a success message to stderr.
pub fn print_success(message: &str) {
    eprintln!("{} {}", style("✔").green(), style(message).green());
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✘").red(), style(message).red().bold());
}

/// Print a warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("!").yellow(), style(message).yellow().bold());
}
