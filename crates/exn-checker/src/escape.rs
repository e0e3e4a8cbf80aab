//! Escape collection.
//!
//! [`EscapeWalker`] walks a member body in pre-order, outside-in, and yields
//! every point where an exception type can leave the body: `throw`
//! statements, calls and object creations whose target documents
//! exceptions. Each region is walked under a handled set. The body starts
//! with the ambient set. A `try` body extends its set with the types of its
//! unfiltered catch clauses. Filters, handlers and `finally` regions keep the
//! set of the enclosing region.
//!
//! The walk uses an explicit frame stack, so deeply nested bodies cannot
//! overflow the native stack. The arena is a tree (children are added before
//! their parent), so every node is visited exactly once.

use std::collections::VecDeque;

use exn_binder::{BinderState, NodeIndex, OperationKind, SymbolId, TypeId};
use exn_common::Span;
use exn_solver::TypeSet;
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::documented::DocumentedExceptions;

/// A point where `exception` can escape the analyzed body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapePoint {
    /// The `throw` keyword, the callee name, or the created type.
    pub span: Span,
    pub exception: TypeId,
    /// Called or constructed member; `None` for a direct throw.
    pub origin: Option<SymbolId>,
}

impl EscapePoint {
    #[must_use]
    pub const fn is_direct_throw(&self) -> bool {
        self.origin.is_none()
    }
}

/// Sibling nodes still to visit, all under the same handled set.
struct Frame {
    nodes: SmallVec<[NodeIndex; 4]>,
    next: usize,
    handled: usize,
}

pub struct EscapeWalker<'a> {
    binder: &'a BinderState,
    documented: &'a DocumentedExceptions<'a>,
    /// Handled sets of the regions seen so far; frames refer to them by index.
    handled_sets: Vec<TypeSet>,
    frames: Vec<Frame>,
    ready: VecDeque<EscapePoint>,
}

impl<'a> EscapeWalker<'a> {
    pub fn new(
        binder: &'a BinderState,
        documented: &'a DocumentedExceptions<'a>,
        root: NodeIndex,
        ambient: TypeSet,
    ) -> Self {
        Self {
            binder,
            documented,
            handled_sets: vec![ambient],
            frames: vec![Frame {
                nodes: smallvec![root],
                next: 0,
                handled: 0,
            }],
            ready: VecDeque::new(),
        }
    }

    fn next_node(&mut self) -> Option<(NodeIndex, usize)> {
        loop {
            let frame = self.frames.last_mut()?;
            if let Some(&node) = frame.nodes.get(frame.next) {
                frame.next += 1;
                return Some((node, frame.handled));
            }
            self.frames.pop();
        }
    }

    fn push_frame(&mut self, nodes: SmallVec<[NodeIndex; 4]>, handled: usize) {
        if !nodes.is_empty() {
            self.frames.push(Frame {
                nodes,
                next: 0,
                handled,
            });
        }
    }

    fn emit(&mut self, handled: usize, span: Span, exception: TypeId, origin: Option<SymbolId>) {
        if self.handled_sets[handled].contains(self.binder, exception) {
            return;
        }
        trace!(?span, ?exception, ?origin, "escape");
        self.ready.push_back(EscapePoint {
            span,
            exception,
            origin,
        });
    }

    fn visit(&mut self, index: NodeIndex, handled: usize) {
        let binder = self.binder;
        let arena = binder.arena();
        let Some(node) = arena.get(index) else {
            return;
        };

        match &node.kind {
            OperationKind::Throw { keyword } => {
                if let Some(&thrown) = node.children.first()
                    && let Some(exception) = arena.unconverted_type(thrown)
                {
                    self.emit(handled, *keyword, exception, None);
                }
            }
            OperationKind::Invocation { target, name_span } => {
                for exception in self.documented.resolved(*target) {
                    self.emit(handled, *name_span, exception, Some(*target));
                }
            }
            OperationKind::ObjectCreation {
                constructor,
                type_span,
            } => {
                for exception in self.documented.resolved(*constructor) {
                    self.emit(handled, *type_span, exception, Some(*constructor));
                }
            }
            OperationKind::Try {
                body,
                catches,
                finally,
            } => {
                let mut caught = self.handled_sets[handled].clone();
                for clause in catches.iter().filter(|clause| clause.filter.is_none()) {
                    caught = match clause.exception_type {
                        Some(ty) => caught.add(binder, ty),
                        None => TypeSet::Universal,
                    };
                }
                let body_handled = self.handled_sets.len();
                self.handled_sets.push(caught);

                // Frames pop last-in first-out: push in reverse visiting order.
                if let Some(finally) = finally {
                    self.push_frame(smallvec![*finally], handled);
                }
                for clause in catches.iter().rev() {
                    let mut nodes: SmallVec<[NodeIndex; 4]> = SmallVec::new();
                    nodes.extend(clause.filter);
                    nodes.push(clause.handler);
                    self.push_frame(nodes, handled);
                }
                self.push_frame(smallvec![*body], body_handled);
                return;
            }
            OperationKind::Conversion { .. } | OperationKind::Other => {}
        }

        self.push_frame(node.children.clone(), handled);
    }
}

impl Iterator for EscapeWalker<'_> {
    type Item = EscapePoint;

    fn next(&mut self) -> Option<EscapePoint> {
        loop {
            if let Some(point) = self.ready.pop_front() {
                return Some(point);
            }
            let (node, handled) = self.next_node()?;
            self.visit(node, handled);
        }
    }
}
