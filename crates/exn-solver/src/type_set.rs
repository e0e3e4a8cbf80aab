//! The `TypeSet` lattice.
//!
//! `Specific` sets are kept as antichains: no element is a subtype of another.
//! Membership is "the type or one of its ancestors is present".

use smallvec::SmallVec;

use crate::TypeId;
use crate::hierarchy::TypeHierarchy;

/// A set of exception types closed under subtyping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSet {
    /// Contains every type. Absorbing for `add`, identity for `intersect`.
    Universal,
    Specific(SmallVec<[TypeId; 4]>),
}

impl Default for TypeSet {
    fn default() -> Self {
        TypeSet::empty()
    }
}

impl TypeSet {
    #[must_use]
    pub fn empty() -> Self {
        TypeSet::Specific(SmallVec::new())
    }

    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(self, TypeSet::Universal)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, TypeSet::Specific(types) if types.is_empty())
    }

    /// The antichain of a `Specific` set; empty for `Universal`.
    #[must_use]
    pub fn types(&self) -> &[TypeId] {
        match self {
            TypeSet::Universal => &[],
            TypeSet::Specific(types) => types,
        }
    }

    #[must_use]
    pub fn contains(&self, db: &dyn TypeHierarchy, ty: TypeId) -> bool {
        match self {
            TypeSet::Universal => true,
            TypeSet::Specific(types) => types.iter().any(|&member| db.is_subtype_of(ty, member)),
        }
    }

    /// The set extended with `ty`. A covered type leaves the set unchanged;
    /// a new supertype replaces the members it covers.
    #[must_use]
    pub fn add(&self, db: &dyn TypeHierarchy, ty: TypeId) -> TypeSet {
        let mut result = self.clone();
        result.insert(db, ty);
        result
    }

    #[must_use]
    pub fn add_all(&self, db: &dyn TypeHierarchy, types: impl IntoIterator<Item = TypeId>) -> TypeSet {
        let mut result = self.clone();
        for ty in types {
            result.insert(db, ty);
        }
        result
    }

    /// Types covered by both sets, expressed by the more specific type of
    /// every related pair.
    #[must_use]
    pub fn intersect(db: &dyn TypeHierarchy, a: &TypeSet, b: &TypeSet) -> TypeSet {
        let (left, right) = match (a, b) {
            (TypeSet::Universal, other) | (other, TypeSet::Universal) => return other.clone(),
            (TypeSet::Specific(left), TypeSet::Specific(right)) => (left, right),
        };
        let mut result = TypeSet::empty();
        for &x in left {
            for &y in right {
                if db.is_subtype_of(x, y) {
                    result.insert(db, x);
                } else if db.is_subtype_of(y, x) {
                    result.insert(db, y);
                }
            }
        }
        result
    }

    fn insert(&mut self, db: &dyn TypeHierarchy, ty: TypeId) {
        let TypeSet::Specific(types) = self else {
            return;
        };
        if types.iter().any(|&member| db.is_subtype_of(ty, member)) {
            return;
        }
        types.retain(|member| !db.is_subtype_of(*member, ty));
        types.push(ty);
    }
}

#[cfg(test)]
#[path = "tests/type_set_tests.rs"]
mod tests;
