//! Command-line interface.
//!
//! Flags are parsed by hand before the terminal is touched, so `--version`
//! and argument errors print normally.
//!
//! ```ignore
//! use dwellpad::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", dwellpad::cli::version_string()),
//!     CliCommand::Help => println!("{}", dwellpad::cli::USAGE),
//!     CliCommand::Run(options) => run(options)?,
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions, SourceChoice, USAGE};
pub use version::{version_string, VERSION};
