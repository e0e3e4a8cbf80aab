//! Member symbols.
//!
//! Callable members (methods, constructors, property and event accessors) carry
//! an optional body; fields and properties may carry an initializer. Both are
//! roots in the binder's operation arena.

use exn_common::{FileId, Span};
use serde::{Deserialize, Serialize};

use crate::docs::Documentation;
use crate::operations::NodeIndex;
use crate::types::TypeId;

/// Handle into the binder's symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a constructor chains to another constructor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstructorInitializer {
    /// No explicit `: this(...)` / `: base(...)`; a class constructor then
    /// implicitly calls the parameterless base constructor.
    #[default]
    None,
    This,
    Base,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Method,
    Constructor {
        initializer: ConstructorInitializer,
        /// Synthesized default constructor with no declaration in source.
        implicit: bool,
    },
    /// `get`/`set` of the property `owner`.
    PropertyAccessor { owner: SymbolId },
    /// `add`/`remove` of the event `owner`.
    EventAccessor { owner: SymbolId },
    Property,
    Event,
    Field,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declaring_type: TypeId,
    pub is_static: bool,
    /// `None` for library members.
    pub file: Option<FileId>,
    pub name_span: Span,
    /// Offset of the first token of the declaration (modifiers included).
    pub declaration_start: Option<u32>,
    /// Parameter type names, rendered in display names.
    pub parameters: Vec<String>,
    pub documentation: Documentation,
    pub overridden: Option<SymbolId>,
    pub body: Option<NodeIndex>,
    pub initializer: Option<NodeIndex>,
}

impl Symbol {
    /// Methods, constructors and accessors.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Method
                | SymbolKind::Constructor { .. }
                | SymbolKind::PropertyAccessor { .. }
                | SymbolKind::EventAccessor { .. }
        )
    }

    #[must_use]
    pub const fn is_constructor(&self) -> bool {
        matches!(self.kind, SymbolKind::Constructor { .. })
    }

    #[must_use]
    pub const fn is_instance_constructor(&self) -> bool {
        self.is_constructor() && !self.is_static
    }

    #[must_use]
    pub const fn is_accessor(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::PropertyAccessor { .. } | SymbolKind::EventAccessor { .. }
        )
    }

    /// Property or event an accessor belongs to.
    #[must_use]
    pub const fn associated_symbol(&self) -> Option<SymbolId> {
        match self.kind {
            SymbolKind::PropertyAccessor { owner } | SymbolKind::EventAccessor { owner } => {
                Some(owner)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn constructor_initializer(&self) -> Option<ConstructorInitializer> {
        match self.kind {
            SymbolKind::Constructor { initializer, .. } => Some(initializer),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        matches!(self.kind, SymbolKind::Constructor { implicit: true, .. })
    }

    /// Whether this member and `other` are the same kind of member for
    /// interface implementation matching.
    #[must_use]
    pub fn same_member_kind(&self, other: &Symbol) -> bool {
        match (self.kind, other.kind) {
            (SymbolKind::Method, SymbolKind::Method)
            | (SymbolKind::Property, SymbolKind::Property)
            | (SymbolKind::Event, SymbolKind::Event)
            | (SymbolKind::Field, SymbolKind::Field)
            | (SymbolKind::Constructor { .. }, SymbolKind::Constructor { .. })
            | (SymbolKind::PropertyAccessor { .. }, SymbolKind::PropertyAccessor { .. })
            | (SymbolKind::EventAccessor { .. }, SymbolKind::EventAccessor { .. }) => true,
            _ => false,
        }
    }
}
