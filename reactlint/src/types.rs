//! Narrow query interface onto an external type checker.
//!
//! The engine never infers types itself. Rules that need them are
//! [`SemanticRule`](crate::rules::SemanticRule)s and receive a
//! [`TypeOracle`] bound to the whole program by the host.

use crate::span::Span;
use crate::tree::{NodeId, NodeRef, OffsetConverter, OffsetEncoding};
use anyhow::Context;
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::ops::{BitAnd, BitOr};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Type flag bit set, using the checker's own flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeFlags(pub u32);

impl TypeFlags {
    /// No flags
    pub const NONE: Self = Self(0);
    /// `any`
    pub const ANY: Self = Self(1);
    /// `unknown`
    pub const UNKNOWN: Self = Self(1 << 1);
    /// `string`
    pub const STRING: Self = Self(1 << 2);
    /// `number`
    pub const NUMBER: Self = Self(1 << 3);
    /// `boolean`
    pub const BOOLEAN: Self = Self(1 << 4);
    /// enum type
    pub const ENUM: Self = Self(1 << 5);
    /// `bigint`
    pub const BIG_INT: Self = Self(1 << 6);
    /// string literal type
    pub const STRING_LITERAL: Self = Self(1 << 7);
    /// number literal type
    pub const NUMBER_LITERAL: Self = Self(1 << 8);
    /// `true` / `false`
    pub const BOOLEAN_LITERAL: Self = Self(1 << 9);
    /// `symbol`
    pub const ES_SYMBOL: Self = Self(1 << 12);
    /// `void`
    pub const VOID: Self = Self(1 << 14);
    /// `undefined`
    pub const UNDEFINED: Self = Self(1 << 15);
    /// `null`
    pub const NULL: Self = Self(1 << 16);
    /// `never`
    pub const NEVER: Self = Self(1 << 17);
    /// object type
    pub const OBJECT: Self = Self(1 << 19);
    /// `A | B`
    pub const UNION: Self = Self(1 << 20);
    /// `A & B`
    pub const INTERSECTION: Self = Self(1 << 21);

    /// Whether any bit is shared with `other`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Flag for a primitive type name as written in source, if known.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let flags = match name.trim() {
            "any" => Self::ANY,
            "unknown" => Self::UNKNOWN,
            "string" => Self::STRING,
            "number" => Self::NUMBER,
            "boolean" => Self::BOOLEAN,
            "bigint" => Self::BIG_INT,
            "symbol" => Self::ES_SYMBOL,
            "void" => Self::VOID,
            "undefined" => Self::UNDEFINED,
            "null" => Self::NULL,
            "never" => Self::NEVER,
            "true" | "false" => Self::BOOLEAN_LITERAL,
            "object" => Self::OBJECT,
            other if other.starts_with(['"', '\'']) => Self::STRING_LITERAL,
            other if other.parse::<f64>().is_ok() => Self::NUMBER_LITERAL,
            _ => return None,
        };
        Some(flags)
    }
}

impl BitOr for TypeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for TypeFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// What the checker knows about the value produced at a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    /// Aggregate flags of the type
    pub flags: TypeFlags,
    /// Flags of each member when the type is a union
    pub alternatives: Vec<TypeFlags>,
}

impl TypeInfo {
    /// A non-union type.
    #[must_use]
    pub fn single(flags: TypeFlags) -> Self {
        Self {
            flags,
            alternatives: Vec::new(),
        }
    }

    /// A union of the given member types.
    #[must_use]
    pub fn union(alternatives: impl IntoIterator<Item = TypeFlags>) -> Self {
        Self {
            flags: TypeFlags::UNION,
            alternatives: alternatives.into_iter().collect(),
        }
    }

    /// Build from primitive type names; several names form a union.
    /// Unknown names are treated as object types.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut flags: Vec<TypeFlags> = names
            .iter()
            .map(|n| TypeFlags::from_name(n.as_ref()).unwrap_or(TypeFlags::OBJECT))
            .collect();
        if flags.len() == 1 {
            Self::single(flags.remove(0))
        } else {
            Self::union(flags)
        }
    }
}

/// Query interface onto an external type checker.
pub trait TypeOracle: Send + Sync {
    /// Type of the value produced at `node`, if the checker knows it.
    fn type_at(&self, node: NodeRef<'_>) -> Option<TypeInfo>;
}

impl<O: TypeOracle + ?Sized> TypeOracle for &O {
    fn type_at(&self, node: NodeRef<'_>) -> Option<TypeInfo> {
        (**self).type_at(node)
    }
}

/// Memoising wrapper around an oracle for one file.
///
/// Queries are keyed by node identity, so a `CachedOracle` must only be used
/// with the tree it was first queried against. Safe to share between rule
/// worker threads.
pub struct CachedOracle<O> {
    inner: O,
    cache: DashMap<NodeId, Option<TypeInfo>>,
    misses: AtomicUsize,
}

impl<O: TypeOracle> CachedOracle<O> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            misses: AtomicUsize::new(0),
        }
    }

    /// Number of queries forwarded to the wrapped oracle.
    #[must_use]
    pub fn underlying_queries(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<O: TypeOracle> TypeOracle for CachedOracle<O> {
    fn type_at(&self, node: NodeRef<'_>) -> Option<TypeInfo> {
        if let Some(hit) = self.cache.get(&node.id()) {
            return hit.value().clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let info = self.inner.type_at(node);
        self.cache.insert(node.id(), info.clone());
        info
    }
}

/// One pre-computed fact in a type-facts file.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeFact {
    /// Start offset of the expression
    pub start: usize,
    /// End offset of the expression
    pub end: usize,
    /// Primitive type names; more than one means a union
    pub types: Vec<String>,
}

/// Oracle answering from facts computed ahead of time by an external checker.
#[derive(Debug, Clone, Default)]
pub struct SpanTypeOracle {
    facts: FxHashMap<Span, TypeInfo>,
}

impl SpanTypeOracle {
    /// Empty oracle; every query answers `None`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of the expression at `span`.
    pub fn insert(&mut self, span: Span, info: TypeInfo) {
        self.facts.insert(span, info);
    }

    /// Build from deserialised facts.
    #[must_use]
    pub fn from_facts(facts: &[TypeFact]) -> Self {
        let mut oracle = Self::new();
        for fact in facts {
            oracle.insert(
                Span::new(fact.start, fact.end),
                TypeInfo::from_names(&fact.types),
            );
        }
        oracle
    }

    /// Number of recorded facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no facts are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl TypeOracle for SpanTypeOracle {
    fn type_at(&self, node: NodeRef<'_>) -> Option<TypeInfo> {
        self.facts.get(&node.span()).cloned()
    }
}

/// Type facts for a set of files, as produced by an external checker.
///
/// The facts file maps file paths to [`TypeFact`] lists, with offsets in
/// UTF-8 bytes:
/// `{ "src/App.tsx": [{ "start": 10, "end": 15, "types": ["string", "undefined"] }] }`.
///
/// Checkers that count in another unit name it, and the offsets are
/// converted to bytes against each file's text at load time:
/// `{ "encoding": "utf16", "files": { "src/App.tsx": [...] } }`.
/// Accepted encodings are `utf8`, `utf16` and `codepoint`.
///
/// Relative paths are resolved against the facts file's directory.
#[derive(Debug, Default)]
pub struct TypeFactsIndex {
    by_file: FxHashMap<PathBuf, SpanTypeOracle>,
    empty: SpanTypeOracle,
}

type FactsByFile = FxHashMap<String, Vec<TypeFact>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum FactsDocument {
    Encoded {
        encoding: OffsetEncoding,
        files: FactsByFile,
    },
    Bytes(FactsByFile),
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Rewrite `facts` for `path` from `encoding` units into byte offsets.
fn facts_to_bytes(
    path: &Path,
    encoding: OffsetEncoding,
    mut facts: Vec<TypeFact>,
) -> anyhow::Result<Vec<TypeFact>> {
    if encoding == OffsetEncoding::Utf8 {
        return Ok(facts);
    }
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let converter = OffsetConverter::new(&source, encoding);
    for fact in &mut facts {
        fact.start = converter.to_byte(fact.start, &source)?;
        fact.end = converter.to_byte(fact.end, &source)?;
    }
    Ok(facts)
}

impl TypeFactsIndex {
    /// Parse a facts document, resolving relative paths against `base`.
    ///
    /// # Errors
    /// Returns error if `json` is not a valid facts document, or if offsets
    /// in a non-byte encoding cannot be mapped onto the file they describe
    pub fn from_json(json: &str, base: &Path) -> anyhow::Result<Self> {
        let (encoding, raw) = match serde_json::from_str(json)? {
            FactsDocument::Encoded { encoding, files } => (encoding, files),
            FactsDocument::Bytes(files) => (OffsetEncoding::Utf8, files),
        };
        let mut by_file = FxHashMap::default();
        for (file, facts) in raw {
            let path = canonical(&base.join(&file));
            let facts = facts_to_bytes(&path, encoding, facts)
                .with_context(|| format!("facts for {file}"))?;
            by_file.insert(path, SpanTypeOracle::from_facts(&facts));
        }
        Ok(Self {
            by_file,
            empty: SpanTypeOracle::new(),
        })
    }

    /// Read a facts file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read type facts {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let index = Self::from_json(&json, base)
            .with_context(|| format!("invalid type facts {}", path.display()))?;
        log::debug!("loaded type facts for {} file(s)", index.len());
        Ok(index)
    }

    /// Oracle for `file`; files without facts get an oracle that knows nothing.
    #[must_use]
    pub fn oracle_for(&self, file: &Path) -> &SpanTypeOracle {
        self.by_file.get(&canonical(file)).unwrap_or(&self.empty)
    }

    /// Number of files with facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    /// Whether no file has facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}
