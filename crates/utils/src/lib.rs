//! The inevitable catchall "utils" crate. Generally only add
//! things here that only depend on the standard library and
//! "core" crates.

mod tracing_util;
pub use tracing_util::*;

/// The name of our binary
pub const NAME: &str = "synoboot";

/// Intended for use in `main`: runs the provided entrypoint and reports
/// any error to stderr before exiting non-zero.
pub fn run_main<F>(f: F)
where
    F: FnOnce() -> anyhow::Result<()>,
{
    use std::io::Write as _;

    use owo_colors::OwoColorize;

    if let Err(e) = f() {
        let mut stderr = anstream::stderr();
        // Best effort; there is nowhere to report a write failure anyway.
        let _ = writeln!(stderr, "{}{:#}", "error: ".red(), e);
        std::process::exit(1);
    }
}
