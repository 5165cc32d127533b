//! Selective projection of a document tree through a rule forest.
//!
//! `project` walks the rules and the input mapping together and builds a new
//! mapping holding only the selected keys, in rule order. Matched values
//! without nested rules are shared with the input tree, never copied or
//! mutated. `trim` wraps it for whole documents given as bytes.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::document::{parse_documents, to_yaml_string, Node, NodeKind};
use crate::error::TrimError;
use crate::rules::Rule;

const ROOT_PATH: &str = "<root>";

/// Projects `input` onto `rules`.
///
/// Fails with `TrimError::NotAMapping` when `input`, or any value reached
/// through a rule with nested rules, is not a mapping.
pub fn project(rules: &[Rule], input: &Node) -> Result<Node, TrimError> {
    let mut path = Vec::new();
    project_at(rules, input, &mut path)
}

fn project_at<'r>(
    rules: &'r [Rule],
    input: &Node,
    path: &mut Vec<&'r str>,
) -> Result<Node, TrimError> {
    let entries = input.entries().ok_or_else(|| TrimError::NotAMapping {
        path: render_path(path),
        found: input.kind_name(),
        mark: input.mark,
    })?;

    let mut out = Vec::with_capacity(rules.len());
    for rule in rules {
        // Linear scan keeps "first match wins" for duplicated keys.
        let Some((key, value)) = entries
            .iter()
            .find(|(k, _)| k.text() == Some(rule.key.as_str()))
        else {
            trace!(key = %rule.key, "rule key not present, skipping");
            continue;
        };

        if rule.is_leaf() {
            out.push((Arc::clone(key), Arc::clone(value)));
        } else {
            path.push(&rule.key);
            let nested = project_at(&rule.include, value, path)?;
            path.pop();
            out.push((Arc::clone(key), Arc::new(nested)));
        }
    }

    Ok(Node {
        kind: NodeKind::Mapping(out),
        style: input.style,
        tag: None,
        anchor: None,
        mark: input.mark,
    })
}

fn render_path(path: &[&str]) -> String {
    if path.is_empty() {
        ROOT_PATH.to_string()
    } else {
        path.join(".")
    }
}

/// Trims a single YAML document down to `rules` and renders the result.
pub fn trim(document: &[u8], rules: &[Rule]) -> Result<Vec<u8>, TrimError> {
    let text = std::str::from_utf8(document)?;
    let mut documents = parse_documents(text)?;
    debug!(documents = documents.len(), "parsed input YAML");

    let root = match documents.len() {
        0 => return Err(TrimError::EmptyDocument),
        1 => documents.remove(0),
        count => return Err(TrimError::UnsupportedMultiDocument { count }),
    };

    let projected = project(rules, &root)?;
    debug!("trimmed input YAML");

    let rendered = to_yaml_string(&projected);
    debug!(bytes = rendered.len(), "rendered output YAML");
    Ok(rendered.into_bytes())
}
