//! Shared data model layer (structs only).
//!
//! ## Files
//! - `models.rs` — configuration file model and `--json` report structs.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Report structs define the `--json` output. Keep them in sync with
//! `docs/contracts/*`.

pub mod models;
