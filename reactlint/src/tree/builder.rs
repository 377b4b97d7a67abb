//! Construction of [`TreeView`]s from any parser.
//!
//! Parsers report offsets in whatever unit their host language uses. The
//! builder converts them to UTF-8 byte offsets once, here, so rules never
//! deal with encodings.

use super::{Node, NodeId, NodeKind, TreeView};
use crate::error::LintError;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Unit in which a parser expresses offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetEncoding {
    /// UTF-8 bytes (tree-sitter, Rust strings)
    Utf8,
    /// UTF-16 code units (JavaScript hosts)
    Utf16,
    /// Unicode scalar values
    CodePoint,
}

/// Node description handed to [`TreeBuilder::push`], in parser units.
#[derive(Debug, Clone, Copy)]
pub struct RawNode {
    /// Kind tag
    pub kind: NodeKind,
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Start of leading trivia, if the parser knows it
    pub full_start: Option<usize>,
    /// Grammar field name
    pub field: Option<&'static str>,
}

impl RawNode {
    /// Describe a node without trivia or field information.
    #[must_use]
    pub const fn new(kind: NodeKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            full_start: None,
            field: None,
        }
    }

    /// Attach the grammar field name.
    #[must_use]
    pub const fn with_field(mut self, field: Option<&'static str>) -> Self {
        self.field = field;
        self
    }

    /// Attach the start of leading trivia.
    #[must_use]
    pub const fn with_full_start(mut self, full_start: usize) -> Self {
        self.full_start = Some(full_start);
        self
    }
}

/// Maps offsets in a given encoding to byte offsets.
#[derive(Debug, Clone)]
pub struct OffsetConverter {
    encoding: OffsetEncoding,
    source_len: usize,
    /// `(unit offset, byte offset)` for every character start plus the end
    boundaries: Vec<(usize, usize)>,
}

impl OffsetConverter {
    /// Index the character boundaries of `source` for `encoding`.
    #[must_use]
    pub fn new(source: &str, encoding: OffsetEncoding) -> Self {
        let boundaries = match encoding {
            OffsetEncoding::Utf8 => Vec::new(),
            OffsetEncoding::Utf16 | OffsetEncoding::CodePoint => {
                let mut units = 0;
                let mut table = Vec::with_capacity(source.len() + 1);
                for (byte, ch) in source.char_indices() {
                    table.push((units, byte));
                    units += match encoding {
                        OffsetEncoding::Utf16 => ch.len_utf16(),
                        _ => 1,
                    };
                }
                table.push((units, source.len()));
                table
            }
        };
        Self {
            encoding,
            source_len: source.len(),
            boundaries,
        }
    }

    /// Byte offset of `offset` in `source`, the text this converter indexed.
    ///
    /// # Errors
    /// Returns [`LintError::UnicodeOffsetMismatch`] if `offset` is past the end
    /// or does not fall on a character boundary
    pub fn to_byte(&self, offset: usize, source: &str) -> Result<usize, LintError> {
        let mismatch = LintError::UnicodeOffsetMismatch {
            offset,
            encoding: self.encoding,
        };
        match self.encoding {
            OffsetEncoding::Utf8 => {
                if offset <= self.source_len && source.is_char_boundary(offset) {
                    Ok(offset)
                } else {
                    Err(mismatch)
                }
            }
            OffsetEncoding::Utf16 | OffsetEncoding::CodePoint => self
                .boundaries
                .binary_search_by_key(&offset, |&(unit, _)| unit)
                .map(|i| self.boundaries[i].1)
                .map_err(|_| mismatch),
        }
    }
}

/// Incremental builder for a [`TreeView`].
///
/// Nodes must be pushed in pre-order (a parent before its children, siblings
/// in source order) so that node ids follow traversal order.
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    converter: OffsetConverter,
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// Start a tree over `source` whose offsets are given in `encoding`.
    #[must_use]
    pub fn new(source: impl Into<String>, encoding: OffsetEncoding) -> Self {
        let source = source.into();
        let converter = OffsetConverter::new(&source, encoding);
        Self {
            source,
            converter,
            nodes: Vec::new(),
        }
    }

    /// Append a node under `parent` (`None` for the root, which must come first).
    ///
    /// A node whose span is not contained in its parent's span is kept but
    /// flagged malformed; rules skip it while traversal continues below it.
    pub fn push(&mut self, parent: Option<NodeId>, raw: RawNode) -> Result<NodeId, LintError> {
        match parent {
            None if !self.nodes.is_empty() => {
                return Err(LintError::Parser("tree already has a root".to_owned()));
            }
            Some(p) if p.index() >= self.nodes.len() => {
                return Err(LintError::Parser(format!(
                    "parent {} pushed before its node",
                    p.index()
                )));
            }
            _ => {}
        }

        let start = self.converter.to_byte(raw.start, &self.source)?;
        let end = self.converter.to_byte(raw.end, &self.source)?;
        let explicit_full_start = raw
            .full_start
            .map(|f| self.converter.to_byte(f, &self.source))
            .transpose()?;

        let id = NodeId(u32::try_from(self.nodes.len()).map_err(|_| {
            LintError::Parser("tree exceeds the supported node count".to_owned())
        })?);
        let span = Span::new(start, end);

        let (malformed, default_full_start) = match parent {
            Some(p) => {
                let parent_node = &self.nodes[p.index()];
                let malformed = start > end || !parent_node.span.contains(&span);
                if malformed {
                    log::warn!(
                        "{}",
                        LintError::MalformedSpan {
                            node: id.index(),
                            span,
                            parent: parent_node.span,
                        }
                    );
                }
                let previous_end = parent_node
                    .children
                    .iter()
                    .rev()
                    .map(|c| &self.nodes[c.index()])
                    .find(|c| !c.kind.is_comment())
                    .map(|c| c.span.end);
                (malformed, previous_end.unwrap_or(parent_node.full_start))
            }
            None => (start > end, 0),
        };

        let full_start = explicit_full_start
            .unwrap_or(default_full_start)
            .min(span.start);

        self.nodes.push(Node {
            kind: raw.kind,
            span,
            full_start,
            field: raw.field,
            parent,
            children: Vec::new(),
            malformed,
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        Ok(id)
    }

    /// Finish the tree. An empty builder yields a bare program root.
    #[must_use]
    pub fn finish(mut self) -> TreeView {
        if self.nodes.is_empty() {
            self.nodes.push(Node {
                kind: NodeKind::Program,
                span: Span::new(0, self.source.len()),
                full_start: 0,
                field: None,
                parent: None,
                children: Vec::new(),
                malformed: false,
            });
        }
        TreeView {
            source: self.source,
            nodes: self.nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_offsets_normalised_once() {
        // "é" is one UTF-16 unit but two bytes; "😀" is two units and four bytes
        let source = "é😀x";
        let mut builder = TreeBuilder::new(source, OffsetEncoding::Utf16);
        let root = builder
            .push(None, RawNode::new(NodeKind::Program, 0, 4))
            .unwrap();
        let x = builder
            .push(Some(root), RawNode::new(NodeKind::Identifier, 3, 4))
            .unwrap();
        let tree = builder.finish();
        assert_eq!(tree.root().span(), Span::new(0, source.len()));
        assert_eq!(tree.get(x).text(), "x");
    }

    #[test]
    fn test_utf16_offset_inside_surrogate_pair() {
        let source = "😀";
        let mut builder = TreeBuilder::new(source, OffsetEncoding::Utf16);
        let err = builder
            .push(None, RawNode::new(NodeKind::Program, 0, 1))
            .unwrap_err();
        assert!(matches!(err, LintError::UnicodeOffsetMismatch { offset: 1, .. }));
    }

    #[test]
    fn test_code_point_offsets() {
        let source = "aé b";
        let mut builder = TreeBuilder::new(source, OffsetEncoding::CodePoint);
        let root = builder
            .push(None, RawNode::new(NodeKind::Program, 0, 4))
            .unwrap();
        let b = builder
            .push(Some(root), RawNode::new(NodeKind::Identifier, 3, 4))
            .unwrap();
        let tree = builder.finish();
        assert_eq!(tree.get(b).text(), "b");
    }

    #[test]
    fn test_utf8_offset_past_end() {
        let mut builder = TreeBuilder::new("ab", OffsetEncoding::Utf8);
        assert!(builder
            .push(None, RawNode::new(NodeKind::Program, 0, 3))
            .is_err());
    }

    #[test]
    fn test_malformed_span_is_flagged_not_fatal() {
        let mut builder = TreeBuilder::new("abcdef", OffsetEncoding::Utf8);
        let root = builder
            .push(None, RawNode::new(NodeKind::Program, 0, 6))
            .unwrap();
        let inner = builder
            .push(Some(root), RawNode::new(NodeKind::CallExpression, 1, 3))
            .unwrap();
        let bad = builder
            .push(Some(inner), RawNode::new(NodeKind::Identifier, 2, 5))
            .unwrap();
        let tree = builder.finish();
        assert!(tree.get(bad).is_malformed());
        assert!(!tree.get(inner).is_malformed());
        assert_eq!(tree.malformed_count(), 1);
    }

    #[test]
    fn test_default_full_start_uses_previous_sibling() {
        let mut builder = TreeBuilder::new("a  b", OffsetEncoding::Utf8);
        let root = builder
            .push(None, RawNode::new(NodeKind::Program, 0, 4))
            .unwrap();
        builder
            .push(Some(root), RawNode::new(NodeKind::Identifier, 0, 1))
            .unwrap();
        let b = builder
            .push(Some(root), RawNode::new(NodeKind::Identifier, 3, 4))
            .unwrap();
        let tree = builder.finish();
        assert_eq!(tree.get(b).full_text(), "  b");
    }

    #[test]
    fn test_second_root_rejected() {
        let mut builder = TreeBuilder::new("a", OffsetEncoding::Utf8);
        builder
            .push(None, RawNode::new(NodeKind::Program, 0, 1))
            .unwrap();
        assert!(builder
            .push(None, RawNode::new(NodeKind::Program, 0, 1))
            .is_err());
    }

    #[test]
    fn test_empty_builder_yields_root() {
        let tree = TreeBuilder::new("", OffsetEncoding::Utf8).finish();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().kind(), NodeKind::Program);
    }
}
