use std::fmt;

/// Error raised while lowering a program model into binder tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// Two types share a fully-qualified name.
    DuplicateType(String),
    /// A type name used by `context` does not resolve.
    UnknownType { name: String, context: String },
    /// A member reference does not resolve.
    UnknownMember { type_name: String, member: String },
    /// An accessor names a property/event its type does not declare.
    UnknownOwner { type_name: String, accessor: String, owner: String },
    /// A type refers to a file index outside the model's file list.
    UnknownFile(u32),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::DuplicateType(name) => write!(f, "duplicate type '{name}'"),
            BindError::UnknownType { name, context } => {
                write!(f, "unknown type '{name}' referenced by {context}")
            }
            BindError::UnknownMember { type_name, member } => {
                write!(f, "type '{type_name}' has no member '{member}'")
            }
            BindError::UnknownOwner {
                type_name,
                accessor,
                owner,
            } => write!(
                f,
                "accessor '{type_name}.{accessor}' belongs to unknown member '{owner}'"
            ),
            BindError::UnknownFile(index) => write!(f, "file index {index} is out of range"),
        }
    }
}

impl std::error::Error for BindError {}
