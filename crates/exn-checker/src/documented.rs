//! Documented-exception resolution.

use std::cell::RefCell;

use exn_binder::{BinderState, Documentation, SymbolId, TypeId};
use exn_solver::TypeSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub type DocumentedTypes = SmallVec<[TypeId; 4]>;

/// Resolved `<exception>` types per member, cached for one member check.
#[derive(Debug)]
pub struct DocumentedExceptions<'a> {
    binder: &'a BinderState,
    cache: RefCell<FxHashMap<SymbolId, DocumentedTypes>>,
}

impl<'a> DocumentedExceptions<'a> {
    pub fn new(binder: &'a BinderState) -> Self {
        Self {
            binder,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Documentation that applies to `symbol`. An accessor without a comment
    /// of its own uses the comment of its property or event.
    pub fn documentation_of(&self, symbol: SymbolId) -> Option<&'a Documentation> {
        let binder = self.binder;
        let info = binder.get_symbol(symbol)?;
        if !info.documentation.has_comment()
            && let Some(owner) = info.associated_symbol()
            && let Some(owner) = binder.get_symbol(owner)
        {
            return Some(&owner.documentation);
        }
        Some(&info.documentation)
    }

    /// Exception types documented on `symbol`, in document order. Entries
    /// whose cref does not resolve are dropped.
    pub fn resolved(&self, symbol: SymbolId) -> DocumentedTypes {
        if let Some(types) = self.cache.borrow().get(&symbol) {
            return types.clone();
        }
        let mut types = DocumentedTypes::new();
        if let Some(documentation) = self.documentation_of(symbol) {
            for entry in &documentation.exceptions {
                if let Some(ty) = self.binder.resolve_cref(&entry.cref)
                    && !types.contains(&ty)
                {
                    types.push(ty);
                }
            }
        }
        self.cache.borrow_mut().insert(symbol, types.clone());
        types
    }

    /// Documented exceptions of `symbol` as a lattice value.
    pub fn documented_set(&self, symbol: SymbolId) -> TypeSet {
        TypeSet::empty().add_all(self.binder, self.resolved(symbol))
    }
}
