#![forbid(unsafe_code)]

//! Listener registrations.
//!
//! A listener is a `(node, event kind) → action` registration tied to a
//! [`CancelToken`]. Dispatching returns the actions to run instead of calling
//! closures, so the owner can apply them with full `&mut` access to itself.
//!
//! # Invariants
//!
//! 1. A registration whose token is cancelled never fires, even before it
//!    is pruned.
//! 2. Registering with an already-cancelled token is refused.
//! 3. Actions are returned target first, then each ancestor (for bubbling
//!    kinds); per node in registration order.

use std::collections::HashMap;

use tpick_core::{CancelToken, EventKind};

use crate::node::{Document, NodeId};

/// Listener registry parameterised by the action type it yields.
#[derive(Debug)]
pub struct ListenerSet<A> {
    by_target: HashMap<(NodeId, EventKind), Vec<(A, CancelToken)>>,
}

impl<A> Default for ListenerSet<A> {
    fn default() -> Self {
        Self {
            by_target: HashMap::new(),
        }
    }
}

impl<A: Clone> ListenerSet<A> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for `kind` events reaching `target`.
    ///
    /// Returns `false` if `token` is already cancelled.
    pub fn add(&mut self, target: NodeId, kind: EventKind, action: A, token: &CancelToken) -> bool {
        if token.is_cancelled() {
            return false;
        }
        self.by_target
            .entry((target, kind))
            .or_default()
            .push((action, token.clone()));
        true
    }

    /// Collect the actions that an event of `kind` on `target` triggers.
    #[must_use]
    pub fn dispatch(&self, doc: &Document, target: NodeId, kind: EventKind) -> Vec<A> {
        if !doc.contains(target) {
            return Vec::new();
        }
        let path: Vec<NodeId> = if kind.bubbles() {
            std::iter::once(target).chain(doc.ancestors(target)).collect()
        } else {
            vec![target]
        };
        let mut actions = Vec::new();
        for node in path {
            if let Some(registrations) = self.by_target.get(&(node, kind)) {
                actions.extend(
                    registrations
                        .iter()
                        .filter(|(_, token)| !token.is_cancelled())
                        .map(|(action, _)| action.clone()),
                );
            }
        }
        actions
    }

    /// Drop registrations that are cancelled or whose node is gone.
    ///
    /// Returns the number of registrations removed.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let before = self.len();
        self.by_target.retain(|(node, _), registrations| {
            if !doc.contains(*node) {
                return false;
            }
            registrations.retain(|(_, token)| !token.is_cancelled());
            !registrations.is_empty()
        });
        let removed = before - self.len();
        if removed > 0 {
            tracing::trace!(removed, remaining = self.len(), "pruned listeners");
        }
        removed
    }

    /// Number of registrations, including cancelled ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    /// Whether there are no registrations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    /// Number of registrations that can still fire.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.by_target
            .values()
            .flatten()
            .filter(|(_, token)| !token.is_cancelled())
            .count()
    }
}
