//! The redaction blacklist: option names that must never be echoed back.
//!
//! A downstream collaborator renders a user-visible view of the boot
//! command line; tokens whose name appears in this list are filtered out
//! of that view.  The list is fixed at build time.

use crate::extract::ExtractError;
use crate::keys;
use crate::runtime_config::{RuntimeConfig, MAX_BLACKLISTED_CMDLINE_TOKENS};

/// The always-redacted option names: our own identity-override keys plus a
/// few host kernel keys that would hint at a tampered boot.
const SENSITIVE_KEYS: &[&str] = &[
    keys::VID,
    keys::PID,
    keys::MFG,
    keys::DOM_SZMAX,
    keys::ELEVATOR,
    keys::LOGLEVEL,
    keys::LOG_BUF_LEN,
    keys::EARLYPRINTK,
    keys::PORT_THAW,
];

/// Populates `redacted_tokens` with the compile-time set of sensitive keys.
///
/// On builds without native SATA DoM support the boot media key is hidden
/// as well, so such a platform never reveals that boot media emulation is
/// in play.  Overflowing the fixed capacity aborts the whole extraction.
pub(crate) fn populate(config: &mut RuntimeConfig) -> Result<(), ExtractError> {
    for key in SENSITIVE_KEYS {
        push_entry(config, key)?;
    }

    #[cfg(not(feature = "native-sata-dom"))]
    push_entry(config, keys::SATADOM)?;

    Ok(())
}

fn push_entry(config: &mut RuntimeConfig, key: &str) -> Result<(), ExtractError> {
    if config.redacted_tokens.len() == MAX_BLACKLISTED_CMDLINE_TOKENS {
        return Err(ExtractError::BlacklistFull {
            capacity: MAX_BLACKLISTED_CMDLINE_TOKENS,
        });
    }

    config.redacted_tokens.push(key.to_owned());
    tracing::debug!(
        "Add cmdline blacklist \"{key}\" @ {}",
        config.redacted_tokens.len() - 1
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::*;

    // Leave room for the conditional boot media entry.
    const_assert!(SENSITIVE_KEYS.len() + 1 <= MAX_BLACKLISTED_CMDLINE_TOKENS);

    fn built() -> Vec<String> {
        let mut config = RuntimeConfig::default();
        populate(&mut config).unwrap();
        config.redacted_tokens
    }

    #[test]
    fn test_core_set_always_present() {
        let tokens = built();
        for key in SENSITIVE_KEYS {
            assert!(tokens.iter().any(|t| t == key), "missing {key}");
        }
        assert!(tokens.len() <= MAX_BLACKLISTED_CMDLINE_TOKENS);
    }

    #[cfg(not(feature = "native-sata-dom"))]
    #[test]
    fn test_boot_media_key_hidden_without_native_support() {
        assert!(built().iter().any(|t| t == keys::SATADOM));
    }

    #[cfg(feature = "native-sata-dom")]
    #[test]
    fn test_boot_media_key_visible_with_native_support() {
        assert!(!built().iter().any(|t| t == keys::SATADOM));
    }

    #[test]
    fn test_overflow_is_fatal() {
        let mut config = RuntimeConfig::default();
        config.redacted_tokens = vec!["x=".to_owned(); MAX_BLACKLISTED_CMDLINE_TOKENS];
        let err = populate(&mut config).unwrap_err();
        assert!(matches!(err, ExtractError::BlacklistFull { capacity }
            if capacity == MAX_BLACKLISTED_CMDLINE_TOKENS));
    }
}
