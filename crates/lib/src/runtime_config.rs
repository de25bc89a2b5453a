//! The runtime configuration assembled from the boot command line.
//!
//! A [`RuntimeConfig`] starts out all-default, is mutated by exactly one
//! extraction pass, and is read-only from then on.  Every owned string in
//! it (MAC overrides, blacklist entries) is released when the aggregate is
//! dropped.

use serde::Serialize;

use crate::bounded::{BoundedString, CopyOutcome};

/// Capacity of the MAC override list.  Must stay single-digit: the
/// indexed `mac<N>=` grammar encodes the slot number as one character.
pub const MAX_NET_IFACES: usize = 8;
/// Max characters of one MAC address override (12 hex digits, no separators).
pub const MAC_ADDR_LEN: usize = 12;
/// Capacity of the redaction blacklist.
pub const MAX_BLACKLISTED_CMDLINE_TOKENS: usize = 10;
/// Max characters of the hardware model.
pub const MODEL_MAX_LENGTH: usize = 10;
/// Max characters of the serial number.
pub const SN_MAX_LENGTH: usize = 13;
/// Largest value accepted for a USB vendor or product id.
pub const VID_PID_MAX: u64 = 0xFFFF;

/// Device model string, e.g. `DS3617xs`.
pub type HardwareModel = BoundedString<MODEL_MAX_LENGTH>;
/// Device serial number string.
pub type SerialNumber = BoundedString<SN_MAX_LENGTH>;
/// One MAC address override in textual form.
pub type MacAddress = BoundedString<MAC_ADDR_LEN>;

/// The kind of boot media to emulate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum BootMediaType {
    /// No SATA boot media was requested; the default (USB) applies.
    #[default]
    Unset,
    /// Native SATA Disk-on-Module.
    SataDom,
    /// Emulated SATA disk standing in for a DoM.
    SataDiskFake,
}

/// The storage port thaw toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PortThaw {
    /// The option was not present (or carried no valid value).
    #[default]
    Unset,
    /// Port thawing explicitly disabled.
    Disabled,
    /// Port thawing explicitly enabled.
    Enabled,
}

/// Boot media identity parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BootMedia {
    /// Requested boot media emulation mode.
    pub media_type: BootMediaType,
    /// USB vendor id override; 0 means unset.
    pub vendor_id: u16,
    /// USB product id override; 0 means unset.
    pub product_id: u16,
    /// Max size (MiB) of a SATA device considered a boot DoM.
    pub dom_size_mib: Option<u64>,
    /// Whether the special factory/test boot path is requested.
    pub manufacturing_mode: bool,
}

/// Fixed-capacity, sparsely populated list of MAC address overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MacOverrides {
    slots: [Option<MacAddress>; MAX_NET_IFACES],
}

impl MacOverrides {
    /// Index of the first empty slot, or `None` if all are taken.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Copies `addr` into slot `index`, allocating the slot if empty.
    ///
    /// Panics if `index` is not below [`MAX_NET_IFACES`].
    pub fn set(&mut self, index: usize, addr: &str) -> CopyOutcome {
        self.slots[index]
            .get_or_insert_with(Default::default)
            .assign(addr)
    }

    /// Returns the override at `index`, if populated.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index)?.as_deref()
    }

    /// Number of populated slots.
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterates over populated slots as `(index, address)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| Some((i, slot.as_deref()?)))
    }
}

/// Everything we learned from the boot command line.
///
/// There is a single instance per process; downstream consumers receive it
/// as shared read-only state.  Note that the extraction pass does *not*
/// cross-check fields against each other (e.g. a chosen boot media type
/// against the model); that is left to the consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    /// Device model, used downstream to determine platform quirks.
    pub hardware_model: HardwareModel,
    /// Device serial number.
    pub serial_number: SerialNumber,
    /// Boot media identity parameters.
    pub boot_media: BootMedia,
    /// Storage port thaw toggle.
    pub port_thaw: PortThaw,
    /// Declared number of network interfaces; 0 means unset, else 1-9.
    pub expected_interface_count: u8,
    /// Per-interface MAC address overrides.
    pub mac_overrides: MacOverrides,
    /// Option names to hide from user-visible command line renderings.
    pub redacted_tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::*;

    // The indexed MAC grammar encodes the slot number as a single digit.
    const_assert!(MAX_NET_IFACES <= 9);

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert!(config.hardware_model.is_empty());
        assert!(config.serial_number.is_empty());
        assert_eq!(config.boot_media.media_type, BootMediaType::Unset);
        assert_eq!(config.boot_media.vendor_id, 0);
        assert_eq!(config.boot_media.product_id, 0);
        assert_eq!(config.boot_media.dom_size_mib, None);
        assert!(!config.boot_media.manufacturing_mode);
        assert_eq!(config.port_thaw, PortThaw::Unset);
        assert_eq!(config.expected_interface_count, 0);
        assert_eq!(config.mac_overrides.populated(), 0);
        assert!(config.redacted_tokens.is_empty());
    }

    #[test]
    fn test_mac_overrides_sequential_fill() {
        let mut macs = MacOverrides::default();
        assert_eq!(macs.first_empty(), Some(0));

        let _ = macs.set(0, "AABBCCDDEEFF");
        assert_eq!(macs.first_empty(), Some(1));
        assert_eq!(macs.get(0), Some("AABBCCDDEEFF"));
        assert_eq!(macs.get(1), None);
        assert_eq!(macs.populated(), 1);
    }

    #[test]
    fn test_mac_overrides_full() {
        let mut macs = MacOverrides::default();
        for i in 0..MAX_NET_IFACES {
            let _ = macs.set(i, "AABBCCDDEEFF");
        }
        assert_eq!(macs.first_empty(), None);
        assert_eq!(macs.populated(), MAX_NET_IFACES);
    }

    #[test]
    fn test_mac_overrides_iter_skips_gaps() {
        let mut macs = MacOverrides::default();
        let _ = macs.set(1, "AABBCCDDEEFF");
        let collected: Vec<_> = macs.iter().collect();
        assert_eq!(collected, vec![(1, "AABBCCDDEEFF")]);
    }
}
