// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use eyre::{Result, eyre};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Size-based rotation: `log`, `log.1` (newest backup) .. `log.N`.
pub struct Rotation {
    pub max_bytes: u64,
    pub backups: u32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            backups: 5,
        }
    }
}

/// What the log file looks like once rotation has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStart {
    /// Missing, empty or just rotated away.
    Fresh,
    /// Holds lines from an earlier run.
    Continuing,
}

impl Rotation {
    fn backup(&self, path: &Path, n: u32) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    /// Create the log directory and rotate `path` when it reached `max_bytes`.
    pub fn prepare(&self, path: &Path) -> io::Result<LogStart> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let len = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };

        match len {
            0 => Ok(LogStart::Fresh),
            n if n < self.max_bytes => Ok(LogStart::Continuing),
            _ => self.shift(path).map(|()| LogStart::Fresh),
        }
    }

    fn shift(&self, path: &Path) -> io::Result<()> {
        if self.backups == 0 {
            return ignore_missing(fs::remove_file(path));
        }

        ignore_missing(fs::remove_file(self.backup(path, self.backups)))?;
        for n in (1..self.backups).rev() {
            ignore_missing(fs::rename(self.backup(path, n), self.backup(path, n + 1)))?;
        }
        fs::rename(path, self.backup(path, 1))
    }
}

fn ignore_missing(res: io::Result<()>) -> io::Result<()> {
    match res {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

pub fn run_header() -> String {
    format!(
        "---- sessionwatch {} started {} (pid {}) ----",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        std::process::id()
    )
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut f = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "{line}")
}

/// Rotate, stamp a run header and open `path` for the file layer.
fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if Rotation::default().prepare(path)? == LogStart::Continuing {
        append_line(path, "")?;
    }
    append_line(path, &run_header())?;

    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber: stderr always, plus `log_path` when given.
///
/// `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool, log_path: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let mut file_error = None;
    let file_layer = log_path.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            file_error = Some(format!("{}: {}", path.display(), e));
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    match (file_error, log_path) {
        (Some(e), _) => tracing::warn!("file logging disabled: {}", e),
        (None, Some(path)) => tracing::debug!("file logging enabled: {}", path.display()),
        (None, None) => {}
    }

    Ok(())
}
