#![forbid(unsafe_code)]

//! Cancellation scope shared by every listener a control registers.
//!
//! A control creates one [`CancelToken`]/[`CancelTrigger`] pair when it is
//! attached and threads the token through every listener registration.
//! Detaching fires the trigger once, which invalidates every registration
//! at the same moment. Nothing is tracked per listener.
//!
//! # Invariants
//!
//! 1. **Atomic**: one `cancel()` flips the shared flag; there is no state in
//!    which some listeners of a scope are live and others are not.
//! 2. **Monotonic**: a cancelled token never becomes live again. A fresh
//!    attach creates a fresh pair.
//! 3. **O(1)**: cancelling touches one flag regardless of how many
//!    listeners observe it.
//!
//! Everything runs on the UI thread, so the flag is an `Rc<Cell<bool>>`.

use std::cell::Cell;
use std::rc::Rc;

/// Observer side of a cancellation scope. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Create a new live scope, returning `(token, trigger)`.
    #[must_use]
    pub fn new() -> (Self, CancelTrigger) {
        let cancelled = Rc::new(Cell::new(false));
        let token = Self {
            cancelled: Rc::clone(&cancelled),
        };
        (token, CancelTrigger { cancelled })
    }

    /// A token that is already cancelled. Registrations made with it never fire.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            cancelled: Rc::new(Cell::new(true)),
        }
    }

    /// Whether the owning scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Whether both tokens observe the same scope.
    #[must_use]
    pub fn same_scope(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Owner side of a cancellation scope.
///
/// Dropping the trigger cancels the scope, so a control that is torn down
/// without an explicit detach still releases its listeners.
#[derive(Debug)]
pub struct CancelTrigger {
    cancelled: Rc<Cell<bool>>,
}

impl CancelTrigger {
    /// Cancel the scope. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.replace(true) {
            tracing::trace!(observers = Rc::strong_count(&self.cancelled) - 1, "scope cancelled");
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// A new token observing this scope.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            cancelled: Rc::clone(&self.cancelled),
        }
    }
}

impl Drop for CancelTrigger {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scope_is_live() {
        let (token, trigger) = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(!trigger.is_cancelled());
    }

    #[test]
    fn cancel_reaches_every_clone() {
        let (token, trigger) = CancelToken::new();
        let clones: Vec<CancelToken> = (0..64).map(|_| token.clone()).collect();
        trigger.cancel();
        assert!(token.is_cancelled());
        assert!(clones.iter().all(CancelToken::is_cancelled));
    }

    #[test]
    fn cancel_is_idempotent() {
        let (token, trigger) = CancelToken::new();
        trigger.cancel();
        trigger.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn dropping_trigger_cancels() {
        let (token, trigger) = CancelToken::new();
        drop(trigger);
        assert!(token.is_cancelled());
    }

    #[test]
    fn fresh_scope_is_independent() {
        let (old, old_trigger) = CancelToken::new();
        old_trigger.cancel();
        let (new, new_trigger) = CancelToken::new();
        assert!(old.is_cancelled());
        assert!(!new.is_cancelled());
        assert!(!old.same_scope(&new));
        assert!(new.same_scope(&new_trigger.token()));
    }

    #[test]
    fn pre_cancelled_token() {
        assert!(CancelToken::cancelled().is_cancelled());
    }
}
