//! Descriptor: the per-type operation table consulted by the containers.
//!
//! A container never inspects stored values directly. Every hash, equality
//! test, copy, release and textual rendering goes through the stored type's
//! `Descriptor` implementation. Implementations are resolved statically, so
//! a table cannot be paired with a descriptor of the wrong type.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Operations a type must provide to be stored in a [`HashTable`] or
/// [`HashSet`].
///
/// Contract:
/// - `equals` is an equivalence relation.
/// - `equals(a, b)` implies `hash(a) == hash(b)`.
/// - `compare`, when supported, is a total order consistent with `equals`.
/// - `format` returns a fresh string and never mutates `self`.
///
/// `duplicate` and `compare` may be declared unsupported. The default
/// implementations panic, which is the fatal contract-violation path.
///
/// [`HashTable`]: crate::HashTable
/// [`HashSet`]: crate::HashSet
pub trait Descriptor: Sized {
    /// Name used when a container formats its type, e.g. `Int32`.
    fn type_name() -> Cow<'static, str>;

    /// Release the value. Containers call this exactly once for every value
    /// they own when it is replaced, cleared or the container is dropped.
    #[inline]
    fn destroy(self) {
        drop(self);
    }

    /// Independent owned copy of `self`.
    fn duplicate(&self) -> Self {
        unsupported("duplicate", &Self::type_name())
    }

    fn equals(&self, other: &Self) -> bool;

    /// Total order over the type.
    fn compare(&self, other: &Self) -> Ordering {
        let _ = other;
        unsupported("compare", &Self::type_name())
    }

    fn hash(&self) -> u32;

    fn format(&self) -> String;
}

/// Report an operation a descriptor declared unsupported.
#[cold]
#[track_caller]
pub fn unsupported(op: &str, type_name: &str) -> ! {
    panic!("{op}() is not defined for {type_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque(u8);

    impl Descriptor for Opaque {
        fn type_name() -> Cow<'static, str> {
            Cow::Borrowed("Opaque")
        }
        fn equals(&self, other: &Self) -> bool {
            self.0 == other.0
        }
        fn hash(&self) -> u32 {
            self.0 as u32
        }
        fn format(&self) -> String {
            format!("Opaque({})", self.0)
        }
    }

    #[test]
    fn default_destroy_consumes() {
        Opaque(1).destroy();
    }

    #[test]
    #[should_panic(expected = "duplicate() is not defined for Opaque")]
    fn duplicate_defaults_to_unsupported() {
        let _ = Opaque(1).duplicate();
    }

    #[test]
    #[should_panic(expected = "compare() is not defined for Opaque")]
    fn compare_defaults_to_unsupported() {
        let _ = Opaque(1).compare(&Opaque(2));
    }
}
