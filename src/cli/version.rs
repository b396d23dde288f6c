//! Version information.

/// The current version of dwellpad, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `dwellpad <version>`.
pub fn version_string() -> String {
    format!("dwellpad {}", VERSION)
}
