//! Host boundary for the exn checked-exception analyzer.
//!
//! A host (compiler, language server, IDE plugin) describes a program as a
//! [`model::ProgramModel`]. The binder lowers it into id-indexed tables:
//! - `types` - the type table (`TypeId`), base classes and interfaces
//! - `symbols` - members (`SymbolId`): methods, constructors, accessors, fields
//! - `operations` - member bodies and initializers as an operation arena (`NodeIndex`)
//! - `docs` - `<exception>` entries parsed from documentation comments
//!
//! `BinderState` answers the semantic queries the checker needs: cref
//! resolution, base types, initializing constructors and interface
//! implementation lookup.

pub mod builder;
pub mod corlib;
pub mod docs;
mod error;
pub mod model;
pub mod operations;
pub mod state;
pub mod symbols;
pub mod types;

pub use builder::ModelBuilder;
pub use docs::{DocumentedException, Documentation};
pub use error::BindError;
pub use operations::{CatchClause, NodeIndex, Operation, OperationArena, OperationKind};
pub use state::{BindOptions, BinderState, SourceFile};
pub use symbols::{ConstructorInitializer, Symbol, SymbolId, SymbolKind};
pub use types::{TypeId, TypeInfo, TypeKind};
