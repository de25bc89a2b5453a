//! # Synology boot loader runtime configuration
//!
//! This crate turns the boot command line into the strongly typed
//! [`RuntimeConfig`](runtime_config::RuntimeConfig) that drives
//! hardware-identity emulation downstream: device model and serial,
//! boot-media emulation mode, USB vendor/product id overrides,
//! manufacturing-mode flag, declared network interface count and
//! per-interface MAC overrides.
//!
//! The configuration is extracted exactly once, during module
//! initialization, and handed out read-only afterwards; there is no
//! re-parsing or hot reload.  Alongside the configuration we build the
//! redaction blacklist: option names that must never appear in any
//! user-visible echo of the command line.

mod blacklist;
pub mod bounded;
pub mod extract;
pub mod keys;
pub mod runtime_config;

pub use extract::{extract_config_from_cmdline, ExtractError};
pub use runtime_config::RuntimeConfig;
