//! Tree-sitter frontend for TypeScript and TSX sources.
//!
//! Converts the concrete syntax tree into a [`TreeView`]. Anonymous tokens
//! (punctuation, keywords) are not materialised as nodes, but their extents
//! decide where each node's leading trivia starts.

use super::{NodeId, NodeKind, OffsetEncoding, RawNode, TreeBuilder, TreeView};
use crate::error::LintError;
use std::path::Path;
use tree_sitter::{Node as TsNode, Parser};

/// Source dialect accepted by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain TypeScript (angle-bracket casts allowed, no JSX)
    TypeScript,
    /// TypeScript or JavaScript with JSX
    Tsx,
}

impl Dialect {
    /// Pick the dialect from a file extension; `None` for unsupported files.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A grammar node waiting to be appended to the builder.
struct Pending<'tree> {
    node: TsNode<'tree>,
    parent: NodeId,
    field: Option<&'static str>,
    full_start: usize,
}

/// Tree-sitter based parser producing [`TreeView`]s.
pub struct SourceParser {
    parser: Parser,
    dialect: Dialect,
}

impl SourceParser {
    /// Create a parser for `dialect`.
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new(dialect: Dialect) -> Result<Self, LintError> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| LintError::Parser(e.to_string()))?;
        Ok(Self { parser, dialect })
    }

    /// The dialect this parser was created for.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse `source` into a tree view.
    ///
    /// Syntax errors do not fail the parse: recovery nodes become
    /// [`NodeKind::Error`] and rules simply do not match them.
    ///
    /// # Errors
    /// Returns error if tree-sitter produces no tree at all
    pub fn parse(&mut self, source: &str) -> Result<TreeView, LintError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| LintError::Parser("tree-sitter returned no tree".to_owned()))?;
        let root = tree.root_node();
        if root.has_error() {
            log::debug!("source contains syntax errors; analysing recovered tree");
        }

        let mut builder = TreeBuilder::new(source, OffsetEncoding::Utf8);
        let root_id = builder.push(
            None,
            RawNode::new(
                NodeKind::from_grammar(root.kind()),
                root.start_byte(),
                root.end_byte(),
            )
            .with_full_start(0),
        )?;

        let mut stack = Vec::new();
        push_children(root, root_id, 0, &mut stack);

        while let Some(item) = stack.pop() {
            let id = builder.push(
                Some(item.parent),
                RawNode::new(
                    NodeKind::from_grammar(item.node.kind()),
                    item.node.start_byte(),
                    item.node.end_byte(),
                )
                .with_field(item.field)
                .with_full_start(item.full_start),
            )?;
            push_children(item.node, id, item.full_start, &mut stack);
        }

        Ok(builder.finish())
    }
}

/// Queue the named children of `node` so that they pop in source order.
fn push_children<'tree>(
    node: TsNode<'tree>,
    id: NodeId,
    full_start: usize,
    stack: &mut Vec<Pending<'tree>>,
) {
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return;
    }
    let mut queued = Vec::new();
    let mut previous_end = full_start;
    loop {
        let child = cursor.node();
        if child.is_named() {
            queued.push(Pending {
                node: child,
                parent: id,
                field: cursor.field_name(),
                full_start: previous_end,
            });
        }
        // Comments are trivia of whatever follows them
        if !child.is_extra() {
            previous_end = child.end_byte();
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
    stack.extend(queued.into_iter().rev());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> TreeView {
        SourceParser::new(Dialect::Tsx).unwrap().parse(source).unwrap()
    }

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(Dialect::from_path(Path::new("a.ts")), Some(Dialect::TypeScript));
        assert_eq!(Dialect::from_path(Path::new("a.tsx")), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_path(Path::new("a.py")), None);
    }

    #[test]
    fn test_root_spans_source() {
        let source = "const x = 1;\n";
        let tree = parse(source);
        assert_eq!(tree.root().kind(), NodeKind::Program);
        assert_eq!(tree.root().span().end, source.len());
        assert_eq!(tree.malformed_count(), 0);
    }

    #[test]
    fn test_ids_follow_source_order() {
        let tree = parse("a; b; c;");
        let idents: Vec<_> = tree
            .root()
            .descendants()
            .filter(|n| n.kind() == NodeKind::Identifier)
            .map(|n| n.text())
            .collect();
        assert_eq!(idents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_new_expression_fields() {
        let tree = parse("function f() { return new Promise(r => r(1)); }");
        let new_expr = tree
            .root()
            .descendants()
            .find(|n| n.kind() == NodeKind::NewExpression)
            .unwrap();
        assert_eq!(new_expr.parent().unwrap().kind(), NodeKind::ReturnStatement);
        let ctor = new_expr.child_by_field("constructor").unwrap();
        assert_eq!(ctor.text(), "Promise");
    }

    #[test]
    fn test_member_full_text_includes_leading_trivia() {
        let source = "interface I {\n  // first\n  b: string;\n  a: number;\n}";
        let tree = parse(source);
        let members: Vec<_> = tree
            .root()
            .descendants()
            .filter(|n| n.kind() == NodeKind::PropertySignature)
            .collect();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].text(), "b: string");
        assert_eq!(members[0].full_text(), "\n  // first\n  b: string");
        assert_eq!(members[1].full_text(), "\n  a: number");
    }
}
