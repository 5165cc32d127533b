//! Service layer: the I/O around the projection engine.
//!
//! ## Service map
//! - `config.rs` — configuration file loading and path resolution.
//! - `source.rs` — input locator resolution (file vs URL) and HTTP fetches.
//! - `cache.rs` — ETag-revalidated HTTP cache on the local filesystem.
//! - `storage.rs` — default directories and output file writing.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.
//! - The engine never sees paths or URLs, only bytes and rules.

pub mod cache;
pub mod config;
pub mod output;
pub mod source;
pub mod storage;
