//! Inspection tool for the synoboot runtime configuration.
//!
//! Parses the kernel command line exactly the way module initialization
//! does and prints the resulting configuration.  Handy when debugging why
//! a particular boot parameter did (or did not) take effect.

use anyhow::Result;
use clap::Parser;

use synoboot_kernel_cmdline::{CmdlineCache, ProcCmdline};
use synoboot_lib::runtime_config::{BootMediaType, PortThaw};
use synoboot_lib::{extract_config_from_cmdline, RuntimeConfig};

/// Parse the kernel command line and show the runtime configuration.
#[derive(Debug, Parser)]
#[command(name = synoboot_utils::NAME, version)]
struct Args {
    /// Emit the configuration as JSON instead of a text summary.
    #[arg(long)]
    json: bool,
}

fn main() {
    synoboot_utils::run_main(run)
}

fn run() -> Result<()> {
    synoboot_utils::initialize_tracing();
    let args = Args::parse();

    let cache = CmdlineCache::new(ProcCmdline);
    let config = extract_config_from_cmdline(&cache)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_summary(&config);
    }

    Ok(())
}

fn print_summary(config: &RuntimeConfig) {
    let or_unset = |s: &str| {
        if s.is_empty() {
            "(unset)".to_owned()
        } else {
            s.to_owned()
        }
    };

    println!("model:           {}", or_unset(&config.hardware_model));
    println!("serial:          {}", or_unset(&config.serial_number));
    let media = match config.boot_media.media_type {
        BootMediaType::Unset => "default (USB)",
        BootMediaType::SataDom => "native SATA DoM",
        BootMediaType::SataDiskFake => "fake SATA disk",
    };
    println!("boot media:      {media}");
    println!(
        "vid/pid:         {:#06x} / {:#06x}",
        config.boot_media.vendor_id, config.boot_media.product_id
    );
    match config.boot_media.dom_size_mib {
        Some(mib) => println!("dom size (MiB):  {mib}"),
        None => println!("dom size (MiB):  (unset)"),
    }
    println!("mfg mode:        {}", config.boot_media.manufacturing_mode);
    let thaw = match config.port_thaw {
        PortThaw::Unset => "(unset)",
        PortThaw::Disabled => "disabled",
        PortThaw::Enabled => "enabled",
    };
    println!("port thaw:       {thaw}");
    match config.expected_interface_count {
        0 => println!("netif count:     (unset)"),
        n => println!("netif count:     {n}"),
    }
    for (slot, mac) in config.mac_overrides.iter() {
        println!("mac #{}:          {mac}", slot + 1);
    }
    println!("redacted tokens: {}", config.redacted_tokens.join(" "));
}
