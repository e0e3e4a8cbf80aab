//! Operation arena.
//!
//! Member bodies and initializers are stored as trees of [`Operation`] nodes
//! referenced by [`NodeIndex`]. Only the shapes exception flow cares about are
//! distinguished; everything else is an `Other` node whose children are
//! traversed structurally.

use exn_common::Span;
use smallvec::SmallVec;

use crate::symbols::SymbolId;
use crate::types::TypeId;

/// Handle into an [`OperationArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A `catch` clause of a `try` operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatchClause {
    /// Caught type; `None` for a catch-all clause.
    pub exception_type: Option<TypeId>,
    /// `when (...)` filter. A filtered clause does not count as handling its type.
    pub filter: Option<NodeIndex>,
    pub handler: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// Any node without exception-flow meaning of its own.
    Other,
    /// `throw expr;` with the thrown expression as the first child.
    /// A bare rethrow has no children.
    Throw { keyword: Span },
    /// Type conversion with the operand as the first child.
    Conversion { implicit: bool },
    /// Call of a method, accessor or chained constructor (`this(...)`/`base(...)`).
    /// `name_span` covers the callee name or the chaining keyword.
    Invocation { target: SymbolId, name_span: Span },
    /// `new T(...)`. `type_span` covers the created type name.
    ObjectCreation { constructor: SymbolId, type_span: Span },
    Try {
        body: NodeIndex,
        catches: Vec<CatchClause>,
        finally: Option<NodeIndex>,
    },
}

#[derive(Clone, Debug)]
pub struct Operation {
    pub kind: OperationKind,
    pub span: Span,
    /// Static type of the expression, when it has one.
    pub ty: Option<TypeId>,
    pub children: SmallVec<[NodeIndex; 4]>,
}

impl Operation {
    #[must_use]
    pub fn new(kind: OperationKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: None,
            children: SmallVec::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct OperationArena {
    nodes: Vec<Operation>,
}

impl OperationArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, operation: Operation) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(operation);
        index
    }

    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Operation> {
        self.nodes.get(index.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Type of `index` before any implicit conversion was applied.
    ///
    /// `throw e` where `e` is implicitly converted to `Exception` reports the
    /// type of `e`, not `Exception`.
    #[must_use]
    pub fn unconverted_type(&self, mut index: NodeIndex) -> Option<TypeId> {
        // Conversion chains are short; the bound only guards malformed arenas.
        for _ in 0..self.nodes.len().max(1) {
            let node = self.get(index)?;
            match node.kind {
                OperationKind::Conversion { implicit: true } => match node.children.first() {
                    Some(&operand) => index = operand,
                    None => return node.ty,
                },
                _ => return node.ty,
            }
        }
        None
    }
}
