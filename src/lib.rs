//! Trim YAML documents down to a configured subset of their keys.
//!
//! The core is [`engine::project`]: it walks a rule forest and a document
//! tree together and returns a new tree holding only the included keys, in
//! rule order, with node styles preserved. [`engine::trim`] does the same for
//! a whole document given as bytes.
//!
//! ```no_run
//! let rules = yamltrimmer::parse_rules("include:\n  - key: database\n").unwrap();
//! let out = yamltrimmer::trim(b"database: {host: db}\ncache: {}\n", &rules).unwrap();
//! assert_eq!(out, b"database: {host: db}\n");
//! ```

pub mod cli;
pub mod commands;
pub mod document;
pub mod domain;
pub mod engine;
pub mod error;
pub mod rules;
pub mod services;

pub use document::Node;
pub use engine::{project, trim};
pub use error::TrimError;
pub use rules::{parse_rules, Rule};
