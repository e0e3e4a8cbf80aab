use exn_binder::{BinderState, TypeId};
use exn_common::limits::MAX_INHERITANCE_DEPTH;
use tracing::trace;

/// Nominal subtyping over base classes.
///
/// Interfaces do not take part: exception types form a single-inheritance
/// tree rooted at the base exception class.
pub trait TypeHierarchy {
    fn base_type_of(&self, ty: TypeId) -> Option<TypeId>;

    /// Reflexive: every type is a subtype of itself. Bounded by
    /// `MAX_INHERITANCE_DEPTH`, so a cyclic base chain answers `false`.
    fn is_subtype_of(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut current = sub;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if current == sup {
                return true;
            }
            match self.base_type_of(current) {
                Some(base) => current = base,
                None => return false,
            }
        }
        trace!(?sub, ?sup, "inheritance depth limit reached");
        false
    }
}

impl TypeHierarchy for BinderState {
    fn base_type_of(&self, ty: TypeId) -> Option<TypeId> {
        self.base_type(ty)
    }
}
