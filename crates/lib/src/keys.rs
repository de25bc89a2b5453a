//! Literal option keys recognized on the boot command line.
//!
//! Kept in one place so the extractors, diagnostics, and the redaction
//! blacklist all refer to the exact same spellings.  All keys are
//! case-sensitive.

/// Boot media vendor id override.
pub const VID: &str = "vid=";
/// Boot media product id override.
pub const PID: &str = "pid=";
/// Manufacturing-mode boot switch (bare token, no value).
pub const MFG: &str = "mfg";
/// Max size of a SATA device (MiB) to be considered a boot DoM.
pub const DOM_SZMAX: &str = "dom_szmax=";

/// Device hardware model.
pub const HW_VERSION: &str = "syno_hw_version=";
/// Device serial number.
pub const SN: &str = "sn=";
/// Storage port thaw toggle.
pub const PORT_THAW: &str = "syno_port_thaw=";
/// SATA boot media mode: 0 = disabled, 1 = native DoM, 2 = fake disk.
pub const SATADOM: &str = "satadom=";
/// Expected number of network interfaces, a single digit 1-9.
pub const NETIF_NUM: &str = "netif_num=";
/// Bulk MAC address override list, comma separated.
pub const MACS: &str = "macs=";

// Host kernel keys which are only of interest to the redaction blacklist.

/// I/O scheduler selection.
pub const ELEVATOR: &str = "elevator=";
/// Console log level.
pub const LOGLEVEL: &str = "loglevel=";
/// printk ring buffer length.
pub const LOG_BUF_LEN: &str = "log_buf_len=";
/// Early printk switch.
pub const EARLYPRINTK: &str = "earlyprintk";
