//! Debug-only guard against descriptor code re-entering a container.
//!
//! Container operations call into descriptor code (`hash`, `equals`,
//! `destroy`, `format`) while slots may be half-moved, for example in the
//! middle of a rehash. Re-entering the same container from such a callback
//! panics in debug builds and names both operations. Release builds compile
//! the guard away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-container tracker. Each public operation begins with
/// `let _g = self.guard.enter("put");`.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Containers are single-threaded: keep them !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _nosend: PhantomData,
        }
    }

    /// Mark `op` as running until the returned guard drops.
    #[inline]
    #[track_caller]
    pub(crate) fn enter(&self, op: &'static str) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(running) = self.active.replace(Some(op)) {
                self.active.set(Some(running));
                panic!("reentrancy detected: {op}() called from descriptor code during {running}()");
            }
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return ReentrancyGuard { _z: PhantomData };
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let prev = self.owner.active.take();
            debug_assert!(prev.is_some());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DebugReentrancy;

    #[test]
    fn sequential_entries_are_ok() {
        let r = DebugReentrancy::new();
        {
            let _g = r.enter("put");
        }
        let _g = r.enter("get");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_naming_both_operations() {
        let r = DebugReentrancy::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = r.enter("clear");
            let _inner = r.enter("get");
        }));
        let err = res.expect_err("nested entry must panic in debug builds");
        let msg = err
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(msg.contains("get() called from descriptor code during clear()"), "{msg}");
        // The outer guard was released during unwinding.
        let _g = r.enter("put");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_entry_is_noop_in_release() {
        let r = DebugReentrancy::new();
        let _g1 = r.enter("clear");
        let _g2 = r.enter("get");
    }
}
