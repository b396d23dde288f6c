//! Command-line argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::DwellConfig;
use crate::error::ConfigError;

/// Where position samples come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceChoice {
    /// Terminal mouse movement (default).
    #[default]
    Pointer,
    /// The gaze estimator; `None` keeps the configured URL.
    Estimator(Option<String>),
}

/// Options for running the keypad.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub source: SourceChoice,
    pub dwell_ms: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl RunOptions {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, mut config: DwellConfig) -> DwellConfig {
        if let Some(ms) = self.dwell_ms {
            config.dwell_threshold = Duration::from_millis(ms);
        }
        if let SourceChoice::Estimator(Some(url)) = &self.source {
            config.estimator.url = url.clone();
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the keypad (default)
    Run(RunOptions),
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
Usage: dwellpad [OPTIONS]

Options:
  --pointer            Use the terminal mouse as the position source (default)
  --estimator [URL]    Use the gaze estimator websocket
  --dwell-ms <N>       Dwell time before a key activates
  --log <PATH>         Log file
  -V, --version        Print version
  -h, --help           Print this help";

/// Parse command-line arguments, skipping the program name.
///
/// # Examples
///
/// ```
/// use dwellpad::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["dwellpad".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--pointer" => options.source = SourceChoice::Pointer,
            "--estimator" => {
                let url = args.next_if(|next| !next.starts_with('-'));
                options.source = SourceChoice::Estimator(url);
            }
            "--dwell-ms" => {
                let raw = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue("--dwell-ms".to_string()))?;
                let ms = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| {
                        ConfigError::invalid("--dwell-ms", &raw, "expected a positive integer")
                    })?;
                options.dwell_ms = Some(ms);
            }
            "--log" => {
                let path = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue("--log".to_string()))?;
                options.log_path = Some(PathBuf::from(path));
            }
            other => return Err(ConfigError::InvalidArgument(other.to_string())),
        }
    }

    Ok(CliCommand::Run(options))
}
