//! Whole-program checking.
//!
//! Work is split into independent units (one member body, one initializer,
//! one override, one type's interface implementations) and fanned out with
//! rayon. The binder is read-only, so units share nothing mutable. Results
//! are merged and sorted by `(file, start, code)`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use exn_binder::{BinderState, SymbolId, SymbolKind, TypeId};
use exn_common::diagnostics::Diagnostic;
use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::context::{CheckerContext, CheckerOptions};
use crate::fixer::{self, TextEdit};
use crate::state::CheckerState;

/// Cooperative cancellation flag, checked between units of work.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Cancellation was requested; `diagnostics` covers only the units that ran.
    pub cancelled: bool,
    /// Units of work that ran to completion.
    pub checked: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WorkItem {
    MemberBody(SymbolId),
    MemberInitializer(SymbolId),
    Override(SymbolId),
    InterfaceImplementations(TypeId),
}

pub struct ProgramChecker<'a> {
    ctx: CheckerContext<'a>,
}

impl<'a> ProgramChecker<'a> {
    pub fn new(binder: &'a BinderState, options: CheckerOptions) -> Self {
        Self {
            ctx: CheckerContext::new(binder, options),
        }
    }

    pub fn context(&self) -> &CheckerContext<'a> {
        &self.ctx
    }

    pub fn check_program(&self, token: &CancellationToken) -> CheckResult {
        let items = self.work_items();
        let _span = info_span!("check_program", units = items.len()).entered();

        let results: Vec<Option<Vec<Diagnostic>>> = items
            .par_iter()
            .map(|&item| {
                if token.is_cancelled() {
                    return None;
                }
                Some(self.check_item(item))
            })
            .collect();

        let checked = results.iter().filter(|r| r.is_some()).count();
        let cancelled = token.is_cancelled() || checked < results.len();
        let mut diagnostics: Vec<Diagnostic> = results.into_iter().flatten().flatten().collect();
        sort_diagnostics(&mut diagnostics);
        debug!(
            diagnostics = diagnostics.len(),
            checked, cancelled, "program check finished"
        );
        CheckResult {
            diagnostics,
            cancelled,
            checked,
        }
    }

    /// Every check that applies to one member.
    pub fn check_symbol(&self, symbol: SymbolId) -> Vec<Diagnostic> {
        let mut state = CheckerState::new(&self.ctx);
        state.check_member_body(symbol);
        state.check_member_initializer(symbol);
        state.check_overridden_member(symbol);
        let mut diagnostics = state.take_diagnostics();
        sort_diagnostics(&mut diagnostics);
        diagnostics
    }

    /// Documentation edits for every member with fixable diagnostics.
    pub fn suggest_documentation_fixes(&self, newline: &str) -> Vec<TextEdit> {
        let binder = self.ctx.binder;
        binder
            .symbols()
            .filter(|(_, symbol)| symbol.file.is_some() && symbol.is_callable())
            .filter_map(|(id, _)| {
                let mut state = CheckerState::new(&self.ctx);
                state.check_member_body(id);
                let names = fixer::exception_names(&state.diagnostics);
                if names.is_empty() {
                    return None;
                }
                fixer::document_exceptions(binder, id, &names, newline)
            })
            .collect()
    }

    fn work_items(&self) -> Vec<WorkItem> {
        let binder = self.ctx.binder;
        let mut items = Vec::new();
        for (id, symbol) in binder.symbols() {
            if symbol.file.is_none() {
                continue;
            }
            if symbol.is_callable()
                && !symbol.is_implicit()
                && (symbol.body.is_some() || symbol.is_constructor())
            {
                items.push(WorkItem::MemberBody(id));
            }
            if symbol.initializer.is_some() {
                items.push(WorkItem::MemberInitializer(id));
            }
            if symbol.overridden.is_some()
                && matches!(
                    symbol.kind,
                    SymbolKind::Method | SymbolKind::Property | SymbolKind::Event
                )
            {
                items.push(WorkItem::Override(id));
            }
        }
        for (id, info) in binder.types() {
            if info.is_from_source() && !info.interfaces.is_empty() {
                items.push(WorkItem::InterfaceImplementations(id));
            }
        }
        items
    }

    fn check_item(&self, item: WorkItem) -> Vec<Diagnostic> {
        let mut state = CheckerState::new(&self.ctx);
        match item {
            WorkItem::MemberBody(symbol) => state.check_member_body(symbol),
            WorkItem::MemberInitializer(symbol) => state.check_member_initializer(symbol),
            WorkItem::Override(symbol) => state.check_overridden_member(symbol),
            WorkItem::InterfaceImplementations(ty) => state.check_interface_implementations(ty),
        }
        state.take_diagnostics()
    }
}

/// Deterministic order: file, start offset, code. Exact duplicates (the same
/// implementation reached through two types) are dropped.
pub fn sort_diagnostics(diagnostics: &mut Vec<Diagnostic>) {
    diagnostics.sort_by(|a, b| {
        (a.file.as_str(), a.start, a.code).cmp(&(b.file.as_str(), b.start, b.code))
    });
    diagnostics.dedup();
}
