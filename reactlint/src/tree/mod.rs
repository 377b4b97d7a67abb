//! Read-only syntax tree view shared by every rule of a pass.
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. Ids are handed
//! out in pre-order, so sorting by id yields source order. Parent links are
//! plain ids: lookup only, never ownership.
//!
//! Trees are produced either by the tree-sitter frontend ([`SourceParser`])
//! or by any other parser through [`TreeBuilder`].

mod builder;
mod kind;
mod parser;

pub use builder::{OffsetConverter, OffsetEncoding, RawNode, TreeBuilder};
pub use kind::NodeKind;
pub use parser::{Dialect, SourceParser};

use crate::span::Span;
use serde::Serialize;

/// Identity of a node within one [`TreeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node in the arena (pre-order index).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One syntax node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Kind tag
    pub kind: NodeKind,
    /// Span of the node's own text
    pub span: Span,
    /// Start of the node's leading trivia (whitespace and comments since the
    /// previous token)
    pub full_start: usize,
    /// Grammar field this node occupies in its parent, if any
    pub field: Option<&'static str>,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Children in source order
    pub children: Vec<NodeId>,
    /// Set when the span violates the containment invariant
    pub malformed: bool,
}

/// Immutable tree for one source file.
#[derive(Debug, Clone)]
pub struct TreeView {
    source: String,
    nodes: Vec<Node>,
}

impl TreeView {
    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Handle for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.index() < self.nodes.len(), "node id from another tree");
        NodeRef { tree: self, id }
    }

    /// The original source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes besides an empty root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1 && self.source.is_empty()
    }

    /// Number of nodes flagged as malformed.
    #[must_use]
    pub fn malformed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.malformed).count()
    }

    /// Depth-first pre-order walk from `from`, calling `visit` for every
    /// reachable node including `from` itself.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees are fine.
    pub fn walk<'t>(&'t self, from: NodeRef<'t>, mut visit: impl FnMut(NodeRef<'t>)) {
        for node in self.descendants(from) {
            visit(node);
        }
    }

    /// Pre-order iterator over `from` and everything below it.
    #[must_use]
    pub fn descendants<'t>(&'t self, from: NodeRef<'t>) -> Descendants<'t> {
        Descendants {
            tree: self,
            stack: vec![from.id],
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Pre-order iterator returned by [`TreeView::descendants`].
pub struct Descendants<'t> {
    tree: &'t TreeView,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Reverse so the leftmost child is popped first
        self.stack
            .extend(self.tree.node(id).children.iter().rev().copied());
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}

/// Borrowed handle to a node; cannot outlive the tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t TreeView,
    id: NodeId,
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("span", &self.span())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'t> NodeRef<'t> {
    fn raw(&self) -> &'t Node {
        self.tree.node(self.id)
    }

    /// Identity of the node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning tree.
    #[must_use]
    pub fn tree(&self) -> &'t TreeView {
        self.tree
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.raw().kind
    }

    /// Span of the node's own text.
    #[must_use]
    pub fn span(&self) -> Span {
        self.raw().span
    }

    /// Span including leading trivia.
    #[must_use]
    pub fn full_span(&self) -> Span {
        let raw = self.raw();
        Span::new(raw.full_start.min(raw.span.start), raw.span.end)
    }

    /// Source text of the node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.span().slice(&self.tree.source).unwrap_or_default()
    }

    /// Source text including leading trivia.
    #[must_use]
    pub fn full_text(&self) -> &'t str {
        self.full_span().slice(&self.tree.source).unwrap_or_default()
    }

    /// Grammar field name this node occupies in its parent.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        self.raw().field
    }

    /// Whether the span of this node violates containment in its parent.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.raw().malformed
    }

    /// Parent node.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.raw().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// All children, in source order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.raw()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Children that are not comments.
    pub fn named_children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'t>> + 't {
        self.children().filter(|c| !c.kind().is_comment())
    }

    /// First child occupying grammar field `field`.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.field() == Some(field))
    }

    /// First child of the given kind.
    #[must_use]
    pub fn child_of_kind(&self, kind: NodeKind) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// First non-comment child.
    #[must_use]
    pub fn first_child(&self) -> Option<NodeRef<'t>> {
        self.named_children().next()
    }

    /// Descend through first children until a leaf; the node holding the
    /// first token of this node's text.
    #[must_use]
    pub fn leftmost_leaf(&self) -> NodeRef<'t> {
        let mut current = *self;
        while let Some(child) = current.first_child() {
            current = child;
        }
        current
    }

    /// Pre-order iterator over this node's subtree, starting with itself.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'t> {
        self.tree.descendants(*self)
    }

    /// Visit this node and its whole subtree in pre-order.
    pub fn walk(&self, visit: impl FnMut(NodeRef<'t>)) {
        self.tree.walk(*self, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TreeView {
        // a(b(c), d)
        let source = "abcd";
        let mut builder = TreeBuilder::new(source, OffsetEncoding::Utf8);
        let a = builder
            .push(None, RawNode::new(NodeKind::Program, 0, 4))
            .unwrap();
        let b = builder
            .push(Some(a), RawNode::new(NodeKind::CallExpression, 1, 3))
            .unwrap();
        builder
            .push(Some(b), RawNode::new(NodeKind::Identifier, 2, 3))
            .unwrap();
        builder
            .push(Some(a), RawNode::new(NodeKind::Identifier, 3, 4))
            .unwrap();
        builder.finish()
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = sample_tree();
        let mut seen = Vec::new();
        tree.walk(tree.root(), |node| seen.push(node.id().index()));
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_walk_from_subtree() {
        let tree = sample_tree();
        let call = tree.get(NodeId(1));
        let kinds: Vec<_> = call.descendants().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::CallExpression, NodeKind::Identifier]);

        let mut seen = Vec::new();
        call.walk(|node| seen.push(node.id().index()));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_parent_lookup() {
        let tree = sample_tree();
        let leaf = tree.get(NodeId(2));
        assert_eq!(leaf.parent().map(|p| p.id()), Some(NodeId(1)));
        assert!(tree.root().parent().is_none());
        assert_eq!(tree.root().leftmost_leaf().id(), NodeId(2));
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let depth = 200_000;
        let source = "x".repeat(depth);
        let mut builder = TreeBuilder::new(&source, OffsetEncoding::Utf8);
        let mut parent = None;
        for i in 0..depth {
            let id = builder
                .push(parent, RawNode::new(NodeKind::Other, i, depth))
                .unwrap();
            parent = Some(id);
        }
        let tree = builder.finish();
        assert_eq!(tree.root().descendants().count(), depth);
    }
}
