use std::fmt;
use std::sync::Arc;

/// Position of a node in its source text. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mark {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// Presentation hint carried through projection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Block,
    Flow,
    Scalar(ScalarStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plain null; keeps the source spelling (`~`, `null`, or empty).
    Null(String),
    Scalar(String),
    Sequence(Vec<Arc<Node>>),
    /// Entries in source order. Duplicate keys are kept as written.
    Mapping(Vec<(Arc<Node>, Arc<Node>)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub style: Style,
    pub tag: Option<String>,
    /// Anchor name from the source (`&name`). Aliases share the anchored `Arc`.
    pub anchor: Option<String>,
    pub mark: Mark,
}

impl Node {
    pub fn scalar(value: impl Into<String>, style: ScalarStyle) -> Self {
        Node {
            kind: NodeKind::Scalar(value.into()),
            style: Style::Scalar(style),
            tag: None,
            anchor: None,
            mark: Mark::default(),
        }
    }

    /// An empty mapping rendered with the given style.
    pub fn mapping(style: Style) -> Self {
        Node {
            kind: NodeKind::Mapping(Vec::new()),
            style,
            tag: None,
            anchor: None,
            mark: Mark::default(),
        }
    }

    pub fn entries(&self) -> Option<&[(Arc<Node>, Arc<Node>)]> {
        match &self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Text of a scalar or null node; `None` for collections.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar(s) | NodeKind::Null(s) => Some(s),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Null(_) => "null",
            NodeKind::Scalar(_) => "scalar",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Mapping(_) => "mapping",
        }
    }

    /// First value whose key text equals `key`.
    pub fn get(&self, key: &str) -> Option<&Arc<Node>> {
        self.entries()?
            .iter()
            .find(|(k, _)| k.text() == Some(key))
            .map(|(_, v)| v)
    }
}
