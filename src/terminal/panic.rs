//! Panic hook that puts the terminal back before the panic is reported.

use super::setup::emergency_restore;
use std::panic;

/// Install a panic hook that restores the terminal, then defers to the
/// previous hook.
///
/// Call this before creating the [`TerminalManager`](super::TerminalManager)
/// and after `color_eyre::install()`, so the eyre report prints on a sane
/// terminal.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
