//! Re-entrancy detection for bindings under construction.
//!
//! Each thread tracks the bindings it is currently constructing. Asking for
//! one of them again from inside its own factory chain is a cycle; it is
//! reported as [`DiError::CircularDependency`] instead of blocking forever on
//! the singleton cell.
//!
//! Entries are binding identities, not keys: a factory that replaces its own
//! key and then resolves it reaches a different binding.

use crate::binding::Binding;
use crate::error::{DiError, Result};
use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static IN_PROGRESS: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Marks a binding as under construction for the lifetime of the guard.
pub(crate) struct ResolutionGuard {
    entry: usize,
}

impl ResolutionGuard {
    pub(crate) fn enter(binding: &Binding) -> Result<Self> {
        let entry = binding as *const Binding as usize;
        let fresh = IN_PROGRESS.with(|set| set.borrow_mut().insert(entry));
        if !fresh {
            return Err(DiError::circular(binding.key()));
        }
        Ok(Self { entry })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        IN_PROGRESS.with(|set| {
            set.borrow_mut().remove(&self.entry);
        });
    }
}
