//! In-memory YAML document tree.
//!
//! ## Files
//! - `node.rs` — `Node`, its kinds, style hints and source positions.
//! - `reader.rs` — builds nodes from `yaml-rust2` parser events.
//! - `writer.rs` — renders nodes back to text, honouring style hints.
//!
//! The tree is read-only once built. Children are `Arc`-shared so a projected
//! tree can point at input subtrees without copying them.

pub mod node;
pub mod reader;
pub mod writer;

pub use node::{Mark, Node, NodeKind, ScalarStyle, Style};
pub use reader::parse_documents;
pub use writer::to_yaml_string;
