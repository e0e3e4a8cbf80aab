//! Exception type queries for the exn analyzer.
//!
//! - [`TypeHierarchy`] - reflexive base-class subtype walk over the type table
//! - [`TypeSet`] - the documented/handled exception lattice (`Universal` or an antichain)
//!
//! Everything here is pure: sets are immutable values and every query takes
//! the hierarchy as an explicit `&dyn TypeHierarchy` argument.

mod hierarchy;
mod type_set;

pub use exn_binder::TypeId;
pub use hierarchy::TypeHierarchy;
pub use type_set::TypeSet;
