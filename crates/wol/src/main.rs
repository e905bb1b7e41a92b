//! wol: entry point.
//!
//! Parses the command line, opens the device registry and runs one command.
//!
//! # Usage
//!
//! ```text
//! wol [OPTIONS] <COMMAND>
//!
//! Commands:
//!   add      Register a device
//!   del      Remove a device by name or MAC address
//!   wake     Send a magic packet to a device
//!   print    List registered devices
//!   example  Print a sample registry file
//!
//! Options:
//!   -c, --config <PATH>  Registry file [env: WOL_CONFIG] [default: ~/.wol.yaml]
//!   -v, --verbose        Log at debug level
//! ```
//!
//! Any error is printed to stderr and the process exits with status 1.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wol::application::manage_devices::DeviceRegistry;
use wol::application::wake_device::WakeSender;
use wol::infrastructure::console::{render_device_table, render_names};
use wol::infrastructure::network::{NetworkInterfaceResolver, UdpTransport};
use wol::infrastructure::storage::{default_registry_path, example_document, YamlRegistryFile};
use wol_core::{Device, MacAddress};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Wake up your devices with a single command.
#[derive(Debug, Parser)]
#[command(name = "wol", version)]
struct Cli {
    /// Path of the device registry.
    #[arg(short, long, global = true, env = "WOL_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a device.
    Add {
        /// Unique device name.
        #[arg(short, long)]
        name: String,

        /// Hardware address, e.g. e0:d5:5e:6e:30:c9.
        #[arg(short, long)]
        mac: String,

        /// Local interface to send from.
        #[arg(short, long)]
        interface: Option<String>,

        /// Broadcast address [default: 255.255.255.255].
        #[arg(short = 'a', long = "addr")]
        broadcast_ip: Option<String>,

        /// UDP port [default: 7].
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Remove a device by name or MAC address.
    Del {
        name_or_mac: String,
    },

    /// Send a magic packet to a device.
    ///
    /// The optional flags override the stored values for this send only.
    Wake {
        name_or_mac: String,

        #[arg(short, long)]
        interface: Option<String>,

        #[arg(short = 'a', long = "addr")]
        broadcast_ip: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List registered devices.
    Print,

    /// Print a sample registry file.
    Example,

    /// Print registered device names, one per line.
    #[command(hide = true)]
    Names,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Example => {
            print!("{}", example_document()?);
            Ok(())
        }
        Command::Add {
            name,
            mac,
            interface,
            broadcast_ip,
            port,
        } => {
            let mac = MacAddress::parse(&mac)?;
            let mut device = Device::new(name, mac);
            if let Some(interface) = interface {
                device = device.with_interface(interface);
            }
            if let Some(ip) = broadcast_ip {
                device = device.with_broadcast_ip(ip);
            }
            if let Some(port) = port {
                device = device.with_port(port);
            }
            let mut registry = open_registry(cli.config)?;
            registry.add(device)?;
            Ok(())
        }
        Command::Del { name_or_mac } => {
            let mut registry = open_registry(cli.config)?;
            registry.remove(&name_or_mac)?;
            Ok(())
        }
        Command::Wake {
            name_or_mac,
            interface,
            broadcast_ip,
            port,
        } => {
            let registry = open_registry(cli.config)?;
            let mut device = registry
                .find(&name_or_mac)
                .cloned()
                .with_context(|| format!("not found device [{name_or_mac}]"))?;
            if let Some(interface) = interface {
                device = device.with_interface(interface);
            }
            if let Some(ip) = broadcast_ip {
                device = device.with_broadcast_ip(ip);
            }
            if let Some(port) = port {
                device = device.with_port(port);
            }

            let sender = WakeSender::new(
                Arc::new(NetworkInterfaceResolver::new()),
                Arc::new(UdpTransport::new()),
            );
            let outcome = sender
                .send(&device)
                .with_context(|| format!("failed to wake {}", device.name))?;
            debug!("wake outcome: {outcome:?}");
            Ok(())
        }
        Command::Print => {
            let registry = open_registry(cli.config)?;
            println!("{}", render_device_table(registry.list()));
            Ok(())
        }
        Command::Names => {
            let registry = open_registry(cli.config)?;
            print!("{}", render_names(registry.list()));
            Ok(())
        }
    }
}

/// Logs go to stderr so `print`, `names` and `example` output stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn open_registry(config: Option<PathBuf>) -> anyhow::Result<DeviceRegistry> {
    let path = match config {
        Some(path) => path,
        None => default_registry_path()
            .context("cannot determine home directory; pass --config or set WOL_CONFIG")?,
    };
    debug!("using registry {}", path.display());
    let store = YamlRegistryFile::new(path);
    Ok(DeviceRegistry::load(Box::new(store))?)
}
