//! Extraction of the runtime configuration from the command line.
//!
//! Each token is offered to the matchers in a fixed priority order until
//! exactly one claims it.  A matcher claims a token whenever its key shape
//! matches, even if the value turns out to be malformed; malformed values
//! are logged and leave the affected field at its default.  Only two
//! things abort the whole pass: failing to obtain the raw line at all, and
//! the blacklist outgrowing its fixed capacity.

use synoboot_kernel_cmdline::{Cmdline, CmdlineCache, CmdlineSource, CMDLINE_MAX};

use crate::blacklist;
use crate::bounded::CopyOutcome;
use crate::keys;
use crate::runtime_config::{
    BootMediaType, HardwareModel, MacAddress, PortThaw, RuntimeConfig, SerialNumber,
    MAX_NET_IFACES, VID_PID_MAX,
};

/// Fatal failures of the extraction pass.
///
/// Per-token validation problems never surface here; they are logged and
/// the affected field keeps its default.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The raw command line could not be obtained from its source.
    #[error("failed to read the kernel command line")]
    Cmdline(#[source] anyhow::Error),
    /// The redaction blacklist outgrew its fixed capacity.
    #[error("command line blacklist exceeds its capacity of {capacity} entries")]
    BlacklistFull {
        /// The capacity that was exceeded.
        capacity: usize,
    },
}

/// A single option matcher: returns `true` when it claimed the token.
type Extractor = fn(&mut RuntimeConfig, &str) -> bool;

/// All matchers, in priority order.  The order is load-bearing: it is the
/// tie-break among overlapping prefixes, and the catch-all must stay last.
const EXTRACTORS: &[Extractor] = &[
    extract_hw_version,
    extract_serial,
    extract_boot_media_type,
    extract_vid,
    extract_pid,
    extract_dom_max_size,
    extract_mfg,
    extract_port_thaw,
    extract_netif_num,
    extract_netif_macs,
    report_unrecognized,
];

/// Runs the full extraction pass over the cached command line.
///
/// Tokenizes the line, feeds every token through the matcher pipeline into
/// a fresh [`RuntimeConfig`], then populates the redaction blacklist.  The
/// returned configuration is complete and meant to be handed out
/// read-only for the rest of the process lifetime.
pub fn extract_config_from_cmdline<S: CmdlineSource>(
    cache: &CmdlineCache<S>,
) -> Result<RuntimeConfig, ExtractError> {
    let line = cache
        .get_cached_line(CMDLINE_MAX)
        .map_err(ExtractError::Cmdline)?;
    tracing::debug!("Cmdline: {line}");

    let mut config = RuntimeConfig::default();
    let cmdline = Cmdline::from(line.as_str());
    let mut tokens = cmdline.iter();
    for token in &mut tokens {
        tracing::trace!("Token |{token}|");
        for extract in EXTRACTORS {
            if extract(&mut config, token) {
                break;
            }
        }
    }
    let delivered = tokens.delivered();

    blacklist::populate(&mut config)?;

    tracing::info!("Cmdline processed successfully, tokens={delivered}");
    Ok(config)
}

/// `syno_hw_version=<text>`: the device model.
fn extract_hw_version(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::HW_VERSION) else {
        return false;
    };

    if config.hardware_model.assign(value) == CopyOutcome::Truncated {
        tracing::warn!(
            "HW version truncated to {} characters",
            HardwareModel::CAPACITY
        );
    }
    tracing::debug!("HW version set to: {}", config.hardware_model);

    true
}

/// `sn=<text>`: the serial number.
fn extract_serial(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::SN) else {
        return false;
    };

    if config.serial_number.assign(value) == CopyOutcome::Truncated {
        tracing::warn!("S/N truncated to {} characters", SerialNumber::CAPACITY);
    }
    tracing::debug!("S/N set to: {}", config.serial_number);

    true
}

/// `satadom=<0|1|2>`: the boot media emulation mode.
///
/// Only the character directly after `=` is inspected.  `0` is a no-op
/// (the default stays in effect), which is harmless but worth a warning.
fn extract_boot_media_type(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::SATADOM) else {
        return false;
    };

    match value.chars().next() {
        Some('0') => tracing::warn!(
            "SATA-based boot media disabled (default will be used, {}0 is a noop)",
            keys::SATADOM
        ),
        Some('1') => {
            config.boot_media.media_type = BootMediaType::SataDom;
            tracing::debug!("Boot media SATADOM (native) requested");
        }
        Some('2') => {
            config.boot_media.media_type = BootMediaType::SataDiskFake;
            tracing::debug!("Boot media SATADISK (fake) requested");
        }
        _ => tracing::error!(
            "Option \"{token}\" is invalid (value should be 0/1/2)"
        ),
    }

    true
}

/// `vid=<int>`: the USB vendor id override.
fn extract_vid(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::VID) else {
        return false;
    };

    if let Some(id) = parse_device_id(keys::VID, value) {
        if config.boot_media.vendor_id != 0 {
            tracing::warn!(
                "VID was already set to {:#06x} by a previous instance of {} - it will be changed now to {id:#06x}",
                config.boot_media.vendor_id,
                keys::VID
            );
        }
        config.boot_media.vendor_id = id;
        tracing::debug!("VID override: {id:#06x}");
    }

    true
}

/// `pid=<int>`: the USB product id override.
fn extract_pid(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::PID) else {
        return false;
    };

    if let Some(id) = parse_device_id(keys::PID, value) {
        if config.boot_media.product_id != 0 {
            tracing::warn!(
                "PID was already set to {:#06x} by a previous instance of {} - it will be changed now to {id:#06x}",
                config.boot_media.product_id,
                keys::PID
            );
        }
        config.boot_media.product_id = id;
        tracing::debug!("PID override: {id:#06x}");
    }

    true
}

/// Parses and range-checks a vendor/product id value; `None` means the
/// value was rejected (already logged) and the field must stay as-is.
fn parse_device_id(key: &str, value: &str) -> Option<u16> {
    let parsed = match parse_prefixed_u64(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!("Cmdline {key} is invalid ({e})");
            return None;
        }
    };

    if parsed > VID_PID_MAX {
        tracing::error!("Cmdline {key} is invalid (value larger than {VID_PID_MAX:#x})");
        return None;
    }

    // the range check above keeps this in u16
    Some(parsed as u16)
}

/// Parses an unsigned integer with C-style radix prefixes: `0x` means
/// hexadecimal, a leading `0` means octal, anything else decimal.
fn parse_prefixed_u64(value: &str) -> Result<u64, std::num::ParseIntError> {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if value.len() > 1 && value.starts_with('0') {
        u64::from_str_radix(&value[1..], 8)
    } else {
        value.parse()
    }
}

/// `dom_szmax=<MiB>`: max size of a SATA device considered a boot DoM.
fn extract_dom_max_size(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::DOM_SZMAX) else {
        return false;
    };

    match value.parse::<i64>() {
        Ok(size_mib) if size_mib > 0 => {
            config.boot_media.dom_size_mib = Some(size_mib as u64);
            tracing::debug!("Set maximum SATA DoM to {size_mib}");
        }
        _ => tracing::error!(
            "Invalid maximum size of SATA DoM (\"{}{value}\")",
            keys::DOM_SZMAX
        ),
    }

    true
}

/// `mfg` (bare token): enables the manufacturing boot path.
fn extract_mfg(config: &mut RuntimeConfig, token: &str) -> bool {
    // exact match including length; "mfgx" must fall through
    if token != keys::MFG {
        return false;
    }

    config.boot_media.manufacturing_mode = true;
    tracing::debug!("MFG boot requested");

    true
}

/// `syno_port_thaw=<0|1>`: the port thaw tri-state.
fn extract_port_thaw(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::PORT_THAW) else {
        return false;
    };

    match value.chars().next() {
        Some('0') => {
            config.port_thaw = PortThaw::Disabled;
            tracing::debug!("Port thaw set to: 0");
        }
        Some('1') => {
            config.port_thaw = PortThaw::Enabled;
            tracing::debug!("Port thaw set to: 1");
        }
        _ => tracing::error!(
            "Option \"{token}\" is invalid (value should be 0 or 1)"
        ),
    }

    true
}

/// `netif_num=<1-9>`: the expected number of network interfaces.
///
/// The value must be exactly one decimal digit; anything longer is
/// rejected rather than read partially.
fn extract_netif_num(config: &mut RuntimeConfig, token: &str) -> bool {
    let Some(value) = token.strip_prefix(keys::NETIF_NUM) else {
        return false;
    };

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), None) => tracing::warn!(
            "You specified no network interfaces (\"{}0\")",
            keys::NETIF_NUM
        ),
        (Some(digit @ '1'..='9'), None) => {
            config.expected_interface_count = digit as u8 - b'0';
            tracing::debug!(
                "Declared network ifaces # as {}",
                config.expected_interface_count
            );
        }
        _ => tracing::error!(
            "Invalid number of network interfaces set (\"{token}\")"
        ),
    }

    true
}

/// MAC overrides: `macs=<a1,a2,...>` (bulk) or `mac<1-8>=<addr>` (indexed).
///
/// The two grammars are mutually exclusive on a given token; mixing them
/// across tokens works but fills slots in encounter order, not by index.
fn extract_netif_macs(config: &mut RuntimeConfig, token: &str) -> bool {
    if let Some(list) = token.strip_prefix(keys::MACS) {
        fill_mac_slots_bulk(config, list);
        return true;
    }

    // Indexed grammar: "mac", one in-range digit, then '=' immediately.
    let bytes = token.as_bytes();
    let max_digit = b'0' + MAX_NET_IFACES as u8;
    if bytes.len() < 5
        || &bytes[..3] != b"mac"
        || !(b'1'..=max_digit).contains(&bytes[3])
        || bytes[4] != b'='
    {
        return false;
    }

    place_mac_in_first_free_slot(config, &token[5..]);
    true
}

/// Fills sequential empty slots from a comma-separated address list.
fn fill_mac_slots_bulk(config: &mut RuntimeConfig, list: &str) {
    let pieces: Vec<&str> = list.split(',').collect();
    let total = pieces.len();

    for (index, piece) in pieces.into_iter().enumerate() {
        // a trailing comma leaves an empty final fragment; not an address
        if index == total - 1 && piece.is_empty() {
            break;
        }

        let Some(slot) = config.mac_overrides.first_empty() else {
            tracing::error!(
                "You set more than {MAX_NET_IFACES} MAC addresses! Only first {index} will be honored."
            );
            break;
        };

        if config.mac_overrides.set(slot, piece) == CopyOutcome::Truncated {
            tracing::warn!(
                "MAC #{} truncated to {} characters",
                slot + 1,
                MacAddress::CAPACITY
            );
        }
        tracing::debug!("Set MAC #{}: {piece}", slot + 1);
    }
}

/// Places one indexed-grammar address into the first free slot.
///
/// Deliberately ignores the digit in the key: slots fill in encounter
/// order regardless of the index the caller wrote.
fn place_mac_in_first_free_slot(config: &mut RuntimeConfig, addr: &str) {
    let Some(slot) = config.mac_overrides.first_empty() else {
        tracing::error!(
            "All {MAX_NET_IFACES} MAC address slots are taken - dropping \"{addr}\""
        );
        return;
    };

    if config.mac_overrides.set(slot, addr) == CopyOutcome::Truncated {
        tracing::warn!(
            "MAC #{} truncated to {} characters",
            slot + 1,
            MacAddress::CAPACITY
        );
    }
    tracing::debug!("Set MAC #{}: {addr}", slot + 1);
}

/// Catch-all: logs the token and claims it, so the pipeline never fails.
fn report_unrecognized(_config: &mut RuntimeConfig, token: &str) -> bool {
    tracing::debug!("Option \"{token}\" not recognized - ignoring");

    true
}
