//! Type table entries.

use exn_common::{FileId, Span};
use serde::{Deserialize, Serialize};

use crate::symbols::SymbolId;

/// Handle into the binder's type table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
}

/// A named type known to the binder, either declared in a source file or
/// supplied by the default library.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    /// Simple name (`FormatException`).
    pub name: String,
    /// Namespace-qualified name (`System.FormatException`).
    pub full_name: String,
    pub kind: TypeKind,
    pub base: Option<TypeId>,
    /// Directly implemented interfaces, in declaration order.
    pub interfaces: Vec<TypeId>,
    pub members: Vec<SymbolId>,
    /// `None` for library types.
    pub file: Option<FileId>,
    pub name_span: Span,
    /// Host-supplied explicit interface implementations: (interface member, implementing member).
    pub interface_map: Vec<(SymbolId, SymbolId)>,
}

impl TypeInfo {
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    #[must_use]
    pub fn is_from_source(&self) -> bool {
        self.file.is_some()
    }
}

/// Last segment of a dotted type name.
#[must_use]
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}
