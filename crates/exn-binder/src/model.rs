//! Serializable program model.
//!
//! This is the wire format a host produces: source files, types, members,
//! documentation comments and member bodies as operation trees. All names are
//! fully-qualified type names; spans are byte offsets into the owning file.

use exn_common::Span;
use serde::{Deserialize, Serialize};

use crate::symbols::ConstructorInitializer;
use crate::types::TypeKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramModel {
    #[serde(default)]
    pub files: Vec<SourceFileModel>,
    #[serde(default)]
    pub types: Vec<TypeModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFileModel {
    pub name: String,
    /// Full text, used for rendering and fix edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeModel {
    /// Fully-qualified name.
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Index into [`ProgramModel::files`]; `None` for metadata-only types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<u32>,
    #[serde(default)]
    pub name_span: Span,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberModel>,
    /// Explicit interface implementations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementations: Vec<ImplementationModel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKindModel {
    Method,
    Constructor,
    PropertyAccessor,
    EventAccessor,
    Property,
    Event,
    Field,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberModel {
    pub name: String,
    pub kind: MemberKindModel,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub name_span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<DocCommentModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<MemberRef>,
    /// Constructor chaining.
    #[serde(default)]
    pub chain: ConstructorInitializer,
    /// Property/event name an accessor belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<OperationModel>,
    /// Field or property initializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<OperationModel>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocCommentModel {
    pub text: String,
    pub offset: u32,
}

/// Reference to a member of a named type. `parameters` disambiguates overloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    #[serde(rename = "type")]
    pub type_name: String,
    pub member: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationModel {
    pub interface_member: MemberRef,
    /// Name of the implementing member on the declaring type.
    pub implementation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum OperationModel {
    /// Structural node (block, statement, expression) with no flow meaning.
    #[serde(rename_all = "camelCase")]
    Node {
        #[serde(default)]
        span: Span,
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        ty: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty", with = "nested")]
        children: Vec<OperationModel>,
    },
    #[serde(rename_all = "camelCase")]
    Throw {
        keyword: Span,
        #[serde(default)]
        span: Span,
        /// `None` for a bare rethrow.
        #[serde(default, skip_serializing_if = "Option::is_none", with = "nested")]
        exception: Option<Box<OperationModel>>,
    },
    #[serde(rename_all = "camelCase")]
    Conversion {
        #[serde(default = "default_true")]
        implicit: bool,
        #[serde(default)]
        span: Span,
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        ty: Option<String>,
        #[serde(with = "nested")]
        operand: Box<OperationModel>,
    },
    #[serde(rename_all = "camelCase")]
    Invocation {
        target: MemberRef,
        name_span: Span,
        #[serde(default)]
        span: Span,
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        ty: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty", with = "nested")]
        arguments: Vec<OperationModel>,
    },
    #[serde(rename_all = "camelCase")]
    ObjectCreation {
        constructor: MemberRef,
        type_span: Span,
        #[serde(default)]
        span: Span,
        #[serde(default, skip_serializing_if = "Vec::is_empty", with = "nested")]
        arguments: Vec<OperationModel>,
    },
    #[serde(rename_all = "camelCase")]
    Try {
        #[serde(default)]
        span: Span,
        #[serde(with = "nested")]
        body: Box<OperationModel>,
        #[serde(default, skip_serializing_if = "Vec::is_empty", with = "nested")]
        catches: Vec<CatchModel>,
        #[serde(default, skip_serializing_if = "Option::is_none", with = "nested")]
        finally: Option<Box<OperationModel>>,
    },
}

const fn default_true() -> bool {
    true
}

impl OperationModel {
    /// Nested operations in evaluation order: children, the thrown expression,
    /// the converted operand, arguments, or a `try` body followed by each
    /// clause's filter and handler and then the `finally` block.
    pub fn operands(&self) -> impl Iterator<Item = &OperationModel> {
        let mut operands: Vec<&OperationModel> = Vec::new();
        match self {
            OperationModel::Node { children, .. } => operands.extend(children),
            OperationModel::Throw { exception, .. } => operands.extend(exception.as_deref()),
            OperationModel::Conversion { operand, .. } => operands.push(operand),
            OperationModel::Invocation { arguments, .. }
            | OperationModel::ObjectCreation { arguments, .. } => operands.extend(arguments),
            OperationModel::Try {
                body,
                catches,
                finally,
                ..
            } => {
                operands.push(body);
                for catch in catches {
                    operands.extend(catch.filter.as_deref());
                    operands.push(&catch.handler);
                }
                operands.extend(finally.as_deref());
            }
        }
        operands.into_iter()
    }

    /// Move every nested operation into `out`, leaving `self` a leaf.
    fn detach_operands(&mut self, out: &mut Vec<OperationModel>) {
        fn detach_boxed(operation: &mut OperationModel, out: &mut Vec<OperationModel>) {
            out.push(std::mem::replace(operation, OperationModel::block(Vec::new())));
        }
        match self {
            OperationModel::Node { children, .. } => out.append(children),
            OperationModel::Throw { exception, .. } => out.extend(exception.take().map(|e| *e)),
            OperationModel::Conversion { operand, .. } => detach_boxed(operand, out),
            OperationModel::Invocation { arguments, .. }
            | OperationModel::ObjectCreation { arguments, .. } => out.append(arguments),
            OperationModel::Try {
                body,
                catches,
                finally,
                ..
            } => {
                detach_boxed(body, out);
                for catch in catches.iter_mut() {
                    out.extend(catch.filter.take().map(|f| *f));
                    detach_boxed(&mut catch.handler, out);
                }
                out.extend(finally.take().map(|f| *f));
            }
        }
    }
}

// Bodies can nest arbitrarily deep; tear them down with a worklist instead of
// recursive drop glue.
impl Drop for OperationModel {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);
        while let Some(mut operation) = pending.pop() {
            operation.detach_operands(&mut pending);
        }
    }
}

/// Serde adapter for nested operations that grows the stack before descending,
/// so deeply nested bodies serialize and deserialize without overflowing.
mod nested {
    use exn_common::limits::{STACK_GROWTH, STACK_RED_ZONE};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || value.serialize(serializer))
    }

    pub(super) fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || T::deserialize(deserializer))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchModel {
    /// Caught type; `None` catches everything.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nested")]
    pub filter: Option<Box<OperationModel>>,
    #[serde(with = "nested")]
    pub handler: Box<OperationModel>,
}
