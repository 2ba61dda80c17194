//! Slot storage: explicit slot state and fail-fast allocation.

use std::alloc::Layout;

/// One position of the backing array. An empty slot is never confused with
/// a stored value, even when the value type has an absent state of its own.
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied { key: K, value: V },
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }
}

/// Allocate `capacity` empty slots.
///
/// Allocation failure is not recoverable: the requested size is logged and
/// the process aborts through the global allocation error handler.
pub(crate) fn allocate<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::new();
    if let Err(err) = slots.try_reserve_exact(capacity) {
        let layout = Layout::array::<Slot<K, V>>(capacity).unwrap_or_else(|_| {
            panic!("capacity overflow: cannot lay out {capacity} slots ({err})")
        });
        log::error!(
            "out of memory: cannot allocate {} bytes for {} slots",
            layout.size(),
            capacity
        );
        std::alloc::handle_alloc_error(layout);
    }
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// Round a capacity request up to a power of two, at least 1.
#[track_caller]
pub(crate) fn round_capacity(requested: usize) -> usize {
    requested
        .max(1)
        .checked_next_power_of_two()
        .unwrap_or_else(|| panic!("capacity overflow: {requested} slots requested"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_powers_of_two() {
        assert_eq!(round_capacity(0), 1);
        assert_eq!(round_capacity(1), 1);
        assert_eq!(round_capacity(2), 2);
        assert_eq!(round_capacity(3), 4);
        assert_eq!(round_capacity(10), 16);
        assert_eq!(round_capacity(1024), 1024);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn unroundable_request_is_fatal() {
        let _ = round_capacity(usize::MAX);
    }

    #[test]
    fn allocation_is_all_empty() {
        let slots: Vec<Slot<i32, i32>> = allocate(8);
        assert_eq!(slots.len(), 8);
        assert!(slots.iter().all(|s| !s.is_occupied()));
    }
}
