//! Absent-aware wrappers around descriptor operations.
//!
//! `None` is the absent sentinel. These helpers give it fixed semantics so a
//! descriptor's own operations never observe an absent value: two absent
//! values are equal, absent never equals present, absent hashes to
//! [`ABSENT_HASH`] and formats as [`ABSENT_TEXT`].

use crate::descriptor::Descriptor;
use std::cmp::Ordering;

/// Hash of the absent value.
pub const ABSENT_HASH: u32 = 0;

/// Text of the absent value.
pub const ABSENT_TEXT: &str = "NULL";

#[inline]
pub fn equals<T: Descriptor>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equals(b),
        (a, b) => a.is_none() && b.is_none(),
    }
}

#[inline]
pub fn hash<T: Descriptor>(a: Option<&T>) -> u32 {
    a.map_or(ABSENT_HASH, T::hash)
}

pub fn format<T: Descriptor>(a: Option<&T>) -> String {
    match a {
        Some(v) => v.format(),
        None => ABSENT_TEXT.to_owned(),
    }
}

#[inline]
pub fn destroy<T: Descriptor>(a: Option<T>) {
    if let Some(v) = a {
        v.destroy();
    }
}

#[inline]
pub fn duplicate<T: Descriptor>(a: Option<&T>) -> Option<T> {
    a.map(T::duplicate)
}

/// Ordering is only defined between present values.
#[track_caller]
pub fn compare<T: Descriptor>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, _) => panic!("compare() had absent left argument ({})", T::type_name()),
        (_, None) => panic!("compare() had absent right argument ({})", T::type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_equals_only_absent() {
        assert!(equals::<i32>(None, None));
        assert!(!equals(Some(&0i32), None));
        assert!(!equals(None, Some(&0i32)));
        assert!(equals(Some(&7i32), Some(&7i32)));
        assert!(!equals(Some(&7i32), Some(&8i32)));
    }

    #[test]
    fn absent_hash_and_format_skip_descriptor() {
        assert_eq!(hash::<String>(None), ABSENT_HASH);
        assert_eq!(format::<String>(None), "NULL");
        assert_eq!(format(Some(&"abc".to_string())), "abc");
        assert_eq!(hash(Some(&5u32)), 5);
    }

    #[test]
    fn absent_destroy_and_duplicate() {
        destroy::<String>(None);
        assert_eq!(duplicate::<i64>(None), None);
        assert_eq!(duplicate(Some(&-3i64)), Some(-3));
    }

    #[test]
    fn compare_present_values() {
        assert_eq!(compare(Some(&1i32), Some(&2i32)), Ordering::Less);
        assert_eq!(compare(Some(&2i32), Some(&2i32)), Ordering::Equal);
    }

    #[test]
    #[should_panic(expected = "absent left argument")]
    fn compare_absent_is_fatal() {
        let _ = compare::<i32>(None, Some(&1));
    }
}
