use std::collections::HashMap;
use std::sync::Arc;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, Scanner, TScalarStyle, Token, TokenType};

use super::node::{Mark, Node, NodeKind, ScalarStyle, Style};
use crate::error::TrimError;

const NULL_SPELLINGS: [&str; 4] = ["~", "null", "Null", "NULL"];

/// Parses every document in `text`, in stream order.
///
/// An empty stream (or one holding only comments) yields no documents.
pub fn parse_documents(text: &str) -> Result<Vec<Node>, TrimError> {
    let mut builder = TreeBuilder::new(text);
    let mut parser = Parser::new(text.chars());
    parser
        .load(&mut builder, true)
        .map_err(|e| TrimError::Syntax {
            message: e.info().to_string(),
            mark: to_mark(e.marker()),
        })?;
    builder.finish()
}

enum Frame {
    Sequence {
        anchor: usize,
        node: Node,
        items: Vec<Arc<Node>>,
    },
    Mapping {
        anchor: usize,
        node: Node,
        entries: Vec<(Arc<Node>, Arc<Node>)>,
        key: Option<Arc<Node>>,
    },
}

struct TreeBuilder {
    source: Vec<char>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Arc<Node>>,
    anchor_names: Vec<String>,
    documents: Vec<Node>,
    error: Option<TrimError>,
}

impl TreeBuilder {
    fn new(text: &str) -> Self {
        TreeBuilder {
            source: text.chars().collect(),
            stack: Vec::new(),
            anchors: HashMap::new(),
            anchor_names: anchor_names(text),
            documents: Vec::new(),
            error: None,
        }
    }

    fn finish(self) -> Result<Vec<Node>, TrimError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.documents),
        }
    }

    fn char_at(&self, mark: &Marker) -> Option<char> {
        self.source.get(mark.index()).copied()
    }

    fn collection_style(&self, mark: &Marker, flow_open: char) -> Style {
        if self.char_at(mark) == Some(flow_open) {
            Style::Flow
        } else {
            Style::Block
        }
    }

    fn anchor_name(&self, anchor: usize) -> Option<String> {
        anchor
            .checked_sub(1)
            .and_then(|i| self.anchor_names.get(i))
            .cloned()
    }

    fn scalar(
        &self,
        value: String,
        style: TScalarStyle,
        anchor: usize,
        tag: Option<Tag>,
        mark: &Marker,
    ) -> Node {
        let style = match style {
            TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            TScalarStyle::Literal => ScalarStyle::Literal,
            TScalarStyle::Folded => ScalarStyle::Folded,
            _ => ScalarStyle::Plain,
        };
        let tag = tag.map(render_tag);
        let is_null = style == ScalarStyle::Plain
            && tag.is_none()
            && NULL_SPELLINGS.contains(&value.as_str());
        let kind = if is_null {
            // The parser reports an empty value as `~`; only a literal `~` in the source is kept.
            if value == "~" && self.char_at(mark) != Some('~') {
                NodeKind::Null(String::new())
            } else {
                NodeKind::Null(value)
            }
        } else {
            NodeKind::Scalar(value)
        };
        Node {
            kind,
            style: Style::Scalar(style),
            tag,
            anchor: self.anchor_name(anchor),
            mark: to_mark(mark),
        }
    }

    fn remember(&mut self, anchor: usize, node: &Arc<Node>) {
        if anchor > 0 {
            self.anchors.insert(anchor, Arc::clone(node));
        }
    }

    fn push_value(&mut self, node: Arc<Node>) {
        match self.stack.last_mut() {
            None => self.documents.push(Arc::unwrap_or_clone(node)),
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None => *key = Some(node),
                Some(k) => entries.push((k, node)),
            },
        }
    }

    fn collection_node(
        &self,
        style: Style,
        anchor: usize,
        tag: Option<Tag>,
        mark: &Marker,
    ) -> Node {
        Node {
            kind: NodeKind::Mapping(Vec::new()),
            style,
            tag: tag.map(render_tag),
            anchor: self.anchor_name(anchor),
            mark: to_mark(mark),
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::Scalar(value, style, anchor, tag) => {
                let node = Arc::new(self.scalar(value, style, anchor, tag, &mark));
                self.remember(anchor, &node);
                self.push_value(node);
            }
            Event::Alias(id) => match self.anchors.get(&id).cloned() {
                Some(node) => self.push_value(node),
                None => {
                    self.error = Some(TrimError::Syntax {
                        message: "alias refers to an unknown anchor".to_string(),
                        mark: to_mark(&mark),
                    });
                }
            },
            Event::SequenceStart(anchor, tag) => {
                let style = self.collection_style(&mark, '[');
                let mut node = self.collection_node(style, anchor, tag, &mark);
                node.kind = NodeKind::Sequence(Vec::new());
                self.stack.push(Frame::Sequence {
                    anchor,
                    node,
                    items: Vec::new(),
                });
            }
            Event::MappingStart(anchor, tag) => {
                let style = self.collection_style(&mark, '{');
                let node = self.collection_node(style, anchor, tag, &mark);
                self.stack.push(Frame::Mapping {
                    anchor,
                    node,
                    entries: Vec::new(),
                    key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (anchor, node) = match self.stack.pop() {
                    Some(Frame::Sequence {
                        anchor,
                        mut node,
                        items,
                    }) => {
                        node.kind = NodeKind::Sequence(items);
                        (anchor, node)
                    }
                    Some(Frame::Mapping {
                        anchor,
                        mut node,
                        entries,
                        ..
                    }) => {
                        node.kind = NodeKind::Mapping(entries);
                        (anchor, node)
                    }
                    None => return,
                };
                let node = Arc::new(node);
                self.remember(anchor, &node);
                self.push_value(node);
            }
            Event::DocumentStart { .. } => self.anchors.clear(),
            _ => {}
        }
    }
}

/// Anchor names in source order. The parser numbers anchors from 1 in the
/// same order and never reuses a number within a stream.
fn anchor_names(text: &str) -> Vec<String> {
    Scanner::new(text.chars())
        .filter_map(|Token(_, token)| match token {
            TokenType::Anchor(name) => Some(name),
            _ => None,
        })
        .collect()
}

fn to_mark(marker: &Marker) -> Mark {
    Mark {
        line: marker.line(),
        column: marker.col() + 1,
    }
}

fn render_tag(tag: Tag) -> String {
    match tag.handle.as_str() {
        "tag:yaml.org,2002:" | "!!" => format!("!!{}", tag.suffix),
        "!" => format!("!{}", tag.suffix),
        handle => format!("!<{}{}>", handle, tag.suffix),
    }
}
