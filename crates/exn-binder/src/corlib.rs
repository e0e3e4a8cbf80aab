//! Default library: the standard exception hierarchy.
//!
//! Library types have no source file. Each one gets an implicit public
//! parameterless constructor so `new T()` and implicit base calls resolve.

use crate::model::TypeModel;
use crate::types::TypeKind;

pub const OBJECT: &str = "System.Object";
pub const EXCEPTION: &str = "System.Exception";

/// `(full name, base)` pairs, bases listed before their subtypes.
pub const CORLIB_TYPES: &[(&str, Option<&str>)] = &[
    (OBJECT, None),
    (EXCEPTION, Some(OBJECT)),
    ("System.SystemException", Some(EXCEPTION)),
    ("System.ApplicationException", Some(EXCEPTION)),
    ("System.AggregateException", Some(EXCEPTION)),
    ("System.FormatException", Some("System.SystemException")),
    ("System.ArgumentException", Some("System.SystemException")),
    ("System.ArgumentNullException", Some("System.ArgumentException")),
    ("System.ArgumentOutOfRangeException", Some("System.ArgumentException")),
    ("System.InvalidOperationException", Some("System.SystemException")),
    ("System.ObjectDisposedException", Some("System.InvalidOperationException")),
    ("System.NotSupportedException", Some("System.SystemException")),
    ("System.NotImplementedException", Some("System.SystemException")),
    ("System.NullReferenceException", Some("System.SystemException")),
    ("System.IndexOutOfRangeException", Some("System.SystemException")),
    ("System.InvalidCastException", Some("System.SystemException")),
    ("System.ArithmeticException", Some("System.SystemException")),
    ("System.OverflowException", Some("System.ArithmeticException")),
    ("System.DivideByZeroException", Some("System.ArithmeticException")),
    ("System.OutOfMemoryException", Some("System.SystemException")),
    ("System.StackOverflowException", Some("System.SystemException")),
    ("System.TimeoutException", Some("System.SystemException")),
    ("System.UnauthorizedAccessException", Some("System.SystemException")),
    ("System.OperationCanceledException", Some("System.SystemException")),
    ("System.Collections.Generic.KeyNotFoundException", Some("System.SystemException")),
    ("System.IO.IOException", Some("System.SystemException")),
    ("System.IO.FileNotFoundException", Some("System.IO.IOException")),
    ("System.IO.EndOfStreamException", Some("System.IO.IOException")),
    ("System.Threading.ThreadAbortException", Some("System.SystemException")),
    ("System.Threading.ThreadInterruptedException", Some("System.SystemException")),
];

/// Type models for the default library.
#[must_use]
pub fn corlib_types() -> Vec<TypeModel> {
    CORLIB_TYPES
        .iter()
        .map(|&(name, base)| TypeModel {
            name: name.to_string(),
            kind: TypeKind::Class,
            base: base.map(str::to_string),
            interfaces: Vec::new(),
            file: None,
            name_span: exn_common::Span::DUMMY,
            members: Vec::new(),
            implementations: Vec::new(),
        })
        .collect()
}
