use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::node::{Node, NodeKind, ScalarStyle, Style};

const INDENT: usize = 2;

/// Renders `node` as a single YAML document with two-space indentation.
///
/// Block collections are laid out one entry per line, flow collections stay
/// inline, and scalars keep their quoting. A style that cannot hold a value
/// (for example a single-quoted scalar with a line break) is written
/// double-quoted instead.
///
/// Anchored nodes are written in full once, with `&name`, and as `*name`
/// wherever they appear again, so shared subtrees are never expanded.
pub fn to_yaml_string(node: &Node) -> String {
    let mut w = Writer::default();
    w.root(node);
    w.out
}

#[derive(Default)]
struct Writer {
    out: String,
    /// Anchors already written, by node identity.
    written: HashMap<*const Node, String>,
    names: HashSet<String>,
}

enum Reference {
    /// First appearance, with the anchor to define if the node has one.
    Define(Option<String>),
    Alias(String),
}

impl Writer {
    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }

    fn reference(&mut self, node: &Node) -> Reference {
        let Some(anchor) = &node.anchor else {
            return Reference::Define(None);
        };
        let id: *const Node = node;
        if let Some(name) = self.written.get(&id) {
            return Reference::Alias(name.clone());
        }
        // Source anchors may be redefined; each written node gets its own name.
        let mut name = anchor.clone();
        let mut n = 1;
        while self.names.contains(&name) {
            n += 1;
            name = format!("{}{}", anchor, n);
        }
        self.names.insert(name.clone());
        self.written.insert(id, name.clone());
        Reference::Define(Some(name))
    }

    fn root(&mut self, node: &Node) {
        let anchor = match self.reference(node) {
            Reference::Define(anchor) => anchor,
            Reference::Alias(name) => {
                self.out.push_str(&format!("*{}\n", name));
                return;
            }
        };
        let props = properties(anchor.as_deref(), node);
        match &node.kind {
            NodeKind::Mapping(entries) if is_block(node) => {
                if !props.is_empty() {
                    self.out.push_str(&props);
                    self.out.push('\n');
                }
                self.mapping(entries, 0, false);
            }
            NodeKind::Sequence(items) if is_block(node) => {
                if !props.is_empty() {
                    self.out.push_str(&props);
                    self.out.push('\n');
                }
                self.sequence(items, 0, false);
            }
            _ => self.scalar_value(node, &props, INDENT),
        }
    }

    /// Writes mapping entries at `indent`. With `continues_line` the first key
    /// follows text already on the current line (`- key: value`).
    fn mapping(
        &mut self,
        entries: &[(Arc<Node>, Arc<Node>)],
        indent: usize,
        continues_line: bool,
    ) {
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 || !continues_line {
                self.pad(indent);
            }
            let key = self.inline(key, false, true);
            self.out.push_str(&key);
            self.out.push_str(key_separator(&key));
            self.nested(value, indent, false);
        }
    }

    fn sequence(&mut self, items: &[Arc<Node>], indent: usize, continues_line: bool) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 || !continues_line {
                self.pad(indent);
            }
            self.out.push('-');
            self.nested(item, indent, true);
        }
    }

    /// Writes a value that follows `key:` or `-` on the current line.
    fn nested(&mut self, node: &Node, indent: usize, in_sequence: bool) {
        let anchor = match self.reference(node) {
            Reference::Define(anchor) => anchor,
            Reference::Alias(name) => {
                self.out.push_str(&format!(" *{}\n", name));
                return;
            }
        };
        let props = properties(anchor.as_deref(), node);
        let child = indent + INDENT;
        match &node.kind {
            NodeKind::Mapping(entries) if is_block(node) => {
                let continues_line = self.open_block(&props, in_sequence);
                self.mapping(entries, child, continues_line);
            }
            NodeKind::Sequence(items) if is_block(node) => {
                let continues_line = self.open_block(&props, in_sequence);
                self.sequence(items, child, continues_line);
            }
            NodeKind::Null(text) if text.is_empty() && props.is_empty() => self.out.push('\n'),
            _ => {
                self.out.push(' ');
                self.scalar_value(node, &props, child);
            }
        }
    }

    /// Ends the `key:`/`-` line before a block collection. Collections inside
    /// a sequence without an anchor or tag start on the dash line (`- a: 1`).
    fn open_block(&mut self, props: &str, in_sequence: bool) -> bool {
        if props.is_empty() && in_sequence {
            self.out.push(' ');
            return true;
        }
        if !props.is_empty() {
            self.out.push(' ');
            self.out.push_str(props);
        }
        self.out.push('\n');
        false
    }

    fn scalar_value(&mut self, node: &Node, props: &str, indent: usize) {
        match block_scalar(node) {
            Some((text, style)) => {
                if !props.is_empty() {
                    self.out.push_str(props);
                    self.out.push(' ');
                }
                self.block_scalar(text, style, indent);
            }
            None => {
                let text = self.inline_body(node, props, false, false);
                self.out.push_str(&text);
                self.out.push('\n');
            }
        }
    }

    fn block_scalar(&mut self, text: &str, style: ScalarStyle, indent: usize) {
        let body = text.trim_end_matches('\n');
        let trailing = text.len() - body.len();
        self.out.push(if style == ScalarStyle::Literal { '|' } else { '>' });
        match trailing {
            0 => self.out.push('-'),
            1 => {}
            _ => self.out.push('+'),
        }
        self.out.push('\n');

        let mut blank_run = 0;
        for (i, line) in body.split('\n').enumerate() {
            if line.is_empty() {
                blank_run += 1;
                if style == ScalarStyle::Literal {
                    self.out.push('\n');
                }
                continue;
            }
            if style == ScalarStyle::Folded && i > 0 {
                // A single break folds into a space, so every kept break needs one blank line.
                self.out.extend(std::iter::repeat('\n').take(blank_run + 1));
            }
            blank_run = 0;
            self.pad(indent);
            self.out.push_str(line);
            self.out.push('\n');
        }
        for _ in 1..trailing {
            self.out.push('\n');
        }
    }

    /// Single-line rendering. `flow` is set inside `{}`/`[]`; `key` for mapping keys.
    fn inline(&mut self, node: &Node, flow: bool, key: bool) -> String {
        match self.reference(node) {
            Reference::Define(anchor) => {
                let props = properties(anchor.as_deref(), node);
                self.inline_body(node, &props, flow, key)
            }
            Reference::Alias(name) => format!("*{}", name),
        }
    }

    fn inline_body(&mut self, node: &Node, props: &str, flow: bool, key: bool) -> String {
        let mut out = String::new();
        if !props.is_empty() {
            out.push_str(props);
            out.push(' ');
        }
        match &node.kind {
            NodeKind::Mapping(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| {
                        let k = self.inline(k, true, true);
                        let v = self.inline(v, true, false);
                        format!("{}{} {}", k, key_separator(&k), v)
                    })
                    .collect();
                out.push('{');
                out.push_str(&parts.join(", "));
                out.push('}');
            }
            NodeKind::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|i| self.inline(i, true, false)).collect();
                out.push('[');
                out.push_str(&parts.join(", "));
                out.push(']');
            }
            NodeKind::Null(text) if text.is_empty() => {
                out.push_str(if flow || key { "null" } else { "" });
            }
            NodeKind::Null(text) => out.push_str(text),
            NodeKind::Scalar(text) => out.push_str(&scalar(text, node.style, flow)),
        }
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

/// `&anchor !tag`, either part omitted when absent.
fn properties(anchor: Option<&str>, node: &Node) -> String {
    let mut parts = Vec::new();
    if let Some(anchor) = anchor {
        parts.push(format!("&{}", anchor));
    }
    if let Some(tag) = &node.tag {
        parts.push(tag.clone());
    }
    parts.join(" ")
}

// An alias name may contain `:`, so an alias key needs a space before the separator.
fn key_separator(key: &str) -> &'static str {
    if key.starts_with('*') {
        " :"
    } else {
        ":"
    }
}

fn is_block(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Mapping(entries) => node.style != Style::Flow && !entries.is_empty(),
        NodeKind::Sequence(items) => node.style != Style::Flow && !items.is_empty(),
        _ => false,
    }
}

/// Text and style of a scalar that can be written as a `|` or `>` block.
fn block_scalar(node: &Node) -> Option<(&str, ScalarStyle)> {
    let style = match node.style {
        Style::Scalar(s @ (ScalarStyle::Literal | ScalarStyle::Folded)) => s,
        _ => return None,
    };
    let text = match &node.kind {
        NodeKind::Scalar(text) => text.as_str(),
        _ => return None,
    };
    let body = text.trim_end_matches('\n');
    let lines = || body.split('\n');
    let representable = !body.is_empty()
        && !text.chars().any(|c| c.is_control() && c != '\n' && c != '\t')
        && !lines().any(|l| !l.is_empty() && l.trim().is_empty())
        && !lines().next().is_some_and(|l| l.is_empty() || l.starts_with(' '))
        && (style == ScalarStyle::Literal
            || !lines().any(|l| l.starts_with(' ') || l.starts_with('\t')));
    representable.then_some((text, style))
}

fn scalar(text: &str, style: Style, flow: bool) -> String {
    match style {
        Style::Scalar(ScalarStyle::SingleQuoted) if !text.contains('\n') => {
            format!("'{}'", text.replace('\'', "''"))
        }
        Style::Scalar(ScalarStyle::Plain) if plain_ok(text, flow) => text.to_string(),
        _ => double_quoted(text),
    }
}

fn plain_ok(text: &str, flow: bool) -> bool {
    !text.is_empty()
        && !text.contains('\n')
        && !(flow
            && (text.contains(|c| matches!(c, ',' | '[' | ']' | '{' | '}'))
                || text.contains(": ")
                || text.contains(" #")))
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() && (c as u32) < 0x100 => {
                out.push_str(&format!("\\x{:02X}", c as u32))
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
