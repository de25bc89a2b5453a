//! Helpers related to tracing, used by main entrypoints

use tracing_subscriber::prelude::*;

/// Initialize the global tracing subscriber.
///
/// Events always go to stderr, filtered by `RUST_LOG` as usual.  When
/// running as root an additional journald layer carries info-and-up
/// records, so boot-time diagnostics survive in the journal.
pub fn initialize_tracing() {
    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_target(false)
        .compact();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::EnvFilter::from_default_env());

    let registry = tracing_subscriber::registry().with(fmt_layer);

    let journald_layer = if rustix::process::getuid().is_root() {
        tracing_journald::layer()
            .ok()
            .map(|layer| layer.with_filter(tracing_subscriber::filter::LevelFilter::INFO))
    } else {
        None
    };

    match journald_layer {
        Some(journald) => registry.with(journald).init(),
        None => registry.init(),
    }
}
