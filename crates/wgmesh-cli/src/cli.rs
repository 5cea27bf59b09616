//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Generate WireGuard configuration files for a full mesh of nodes.
#[derive(Parser, Debug, Clone)]
#[command(name = "wgmesh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML manifest describing all nodes.
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,

    /// Show verbose output and full error chains.
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory the per-peer .conf files are written to.
    #[arg(short, long, default_value = wgmesh::output::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Derive public keys in-process instead of invoking the 'wg'
    /// utility.
    #[arg(long)]
    pub local_keys: bool,
}
