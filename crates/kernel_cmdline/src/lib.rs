//! Kernel command line retrieval and tokenization.
//!
//! The boot command line is a single line of space-separated tokens handed
//! to us by the host environment.  This crate covers the plumbing side of
//! dealing with it: the `source` module fetches the raw text (at most once
//! per process, through a caching layer), and the `tokens` module splits a
//! fetched line into its individual tokens.
//!
//! What the tokens *mean* is the business of the `synoboot-lib` crate; this
//! one deliberately knows nothing about any particular option.

pub mod source;
pub mod tokens;

pub use source::{CmdlineCache, CmdlineSource, ProcCmdline};
pub use tokens::Cmdline;

/// Maximum length of the raw command line we expect and process.  A longer
/// line is truncated to this many bytes with a warning.
pub const CMDLINE_MAX: usize = 1024;
