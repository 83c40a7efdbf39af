//! Logging init: file under XDG state dir (or `[log] file`), or stderr.
//!
//! Filter precedence: `RUST_LOG`, then `[log] filter`, then [`DEFAULT_FILTER`].

use crate::config::LogConfig;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,cdl_core=debug,cdl=debug";

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// Directives used when `RUST_LOG` is unset. An unparsable `[log] filter`
/// falls back to the default (`validate` reports it).
fn configured_directives(cfg: &LogConfig) -> &str {
    match cfg.filter.as_deref() {
        Some(filter) if EnvFilter::try_new(filter).is_ok() => filter,
        _ => DEFAULT_FILTER,
    }
}

fn env_filter(cfg: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_directives(cfg)))
}

/// Log file: `[log] file` if set, else `~/.local/state/cdl/cdl.log`.
pub fn log_file_path(cfg: &LogConfig) -> Result<PathBuf> {
    if let Some(file) = &cfg.file {
        return Ok(file.clone());
    }
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
    Ok(xdg_dirs.get_state_home().join("cdl").join("cdl.log"))
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file: {}", path.display()))
}

/// Initialize structured logging to the log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging(cfg: &LogConfig) -> Result<()> {
    let path = log_file_path(cfg)?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(BoxMakeWriter::new(FileMakeWriter(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {}", e))?;

    tracing::info!("cdl logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only. Used for `--log-stderr` and when
/// [`init_logging`] fails so the CLI doesn't crash.
pub fn init_logging_stderr(cfg: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
