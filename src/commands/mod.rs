//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — cache maintenance.
//! - `runtime.rs` — trim/check.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate I/O to `services/*` and projection to `engine`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

use crate::cli::{Cli, Commands};

pub use admin::handle_cache_commands;
pub use runtime::{handle_check, handle_trim};

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        None | Some(Commands::Trim) => handle_trim(cli),
        Some(Commands::Check) => handle_check(cli),
        Some(Commands::Cache { command }) => handle_cache_commands(cli, command),
    }
}
