use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::services::config::DEFAULT_CONFIG_PATH;
use crate::services::source::DEFAULT_TIMEOUT_MS;

#[derive(Parser, Debug)]
#[command(
    name = "yamltrimmer",
    version,
    about = "Trim a YAML document down to the keys a configuration includes"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Path to the configuration file"
    )]
    pub config: PathBuf,
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT_MS,
        help = "Timeout for fetching URL inputs, in milliseconds"
    )]
    pub timeout_ms: u64,
    /// Defaults to `trim`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read the input, keep the included keys and write the output.
    Trim,
    /// Validate the configuration and print the rule tree.
    Check,
    /// Manage the HTTP download cache.
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheCommands {
    /// Remove cached downloads and their ETags.
    Clear,
}
