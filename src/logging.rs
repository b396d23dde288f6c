//! Log file setup.
//!
//! The keypad owns the terminal, so logs go to a file. The filter comes from
//! `DWELLPAD_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "DWELLPAD_LOG";

/// Filter used when no environment variable is set.
pub const DEFAULT_FILTER: &str = "dwellpad=info";

const LOG_FILE_NAME: &str = "dwellpad.log";

/// `<cache dir>/dwellpad/dwellpad.log`, or the temp dir if there is no
/// cache dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dwellpad")
        .join(LOG_FILE_NAME)
}

/// Filter from `DWELLPAD_LOG`, `RUST_LOG` or the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open `path` for appending, creating parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path` (or the default path).
///
/// Returns the path actually used.
pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {}", e))?;

    Ok(path)
}
