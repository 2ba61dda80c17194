//! Ready-made descriptors for primitive values, strings, the unit type,
//! small tuples and optional values.

use crate::descriptor::Descriptor;
use crate::dispatch;
use std::borrow::Cow;
use std::cmp::Ordering;

macro_rules! primitive_descriptor {
    ($ty:ty, $name:literal, |$v:ident| $hash:expr) => {
        impl Descriptor for $ty {
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }
            #[inline]
            fn duplicate(&self) -> Self {
                *self
            }
            #[inline]
            fn equals(&self, other: &Self) -> bool {
                self == other
            }
            #[inline]
            fn compare(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
            #[inline]
            fn hash(&self) -> u32 {
                let $v = *self;
                $hash
            }
            fn format(&self) -> String {
                self.to_string()
            }
        }
    };
}

// Non-negative 32-bit integers hash to themselves, so small integer keys
// land in ascending slots.
primitive_descriptor!(i32, "Int32", |v| v as u32);
primitive_descriptor!(u32, "UInt32", |v| v);
primitive_descriptor!(i64, "Int64", |v| (v | (v >> 32)) as u32);
primitive_descriptor!(u64, "UInt64", |v| (v | (v >> 32)) as u32);
primitive_descriptor!(char, "Character", |v| v as u32);
primitive_descriptor!(bool, "Boolean", |v| v as u32);

/// Polynomial string hash, `h = h * 31 + byte`.
#[inline]
pub fn str_hash(s: &str) -> u32 {
    s.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}

impl Descriptor for String {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }
    fn duplicate(&self) -> Self {
        self.clone()
    }
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
    fn compare(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
    fn hash(&self) -> u32 {
        str_hash(self)
    }
    fn format(&self) -> String {
        self.clone()
    }
}

/// The unit type stands in for "no value" in sets.
impl Descriptor for () {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Void")
    }
    fn duplicate(&self) -> Self {}
    fn equals(&self, _other: &Self) -> bool {
        true
    }
    fn compare(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
    fn hash(&self) -> u32 {
        0
    }
    fn format(&self) -> String {
        "Void".to_owned()
    }
}

/// `None` is the absent sentinel; see [`crate::dispatch`].
impl<T: Descriptor> Descriptor for Option<T> {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }
    fn destroy(self) {
        dispatch::destroy(self)
    }
    fn duplicate(&self) -> Self {
        dispatch::duplicate(self.as_ref())
    }
    fn equals(&self, other: &Self) -> bool {
        dispatch::equals(self.as_ref(), other.as_ref())
    }
    fn compare(&self, other: &Self) -> Ordering {
        dispatch::compare(self.as_ref(), other.as_ref())
    }
    fn hash(&self) -> u32 {
        dispatch::hash(self.as_ref())
    }
    fn format(&self) -> String {
        dispatch::format(self.as_ref())
    }
}

macro_rules! tuple_descriptor {
    ($($t:ident $i:tt),+) => {
        impl<$($t: Descriptor),+> Descriptor for ($($t,)+) {
            fn type_name() -> Cow<'static, str> {
                let names: &[Cow<'static, str>] = &[$($t::type_name()),+];
                Cow::Owned(format!("Tuple<{}>", names.join(", ")))
            }
            fn destroy(self) {
                $(self.$i.destroy();)+
            }
            fn duplicate(&self) -> Self {
                ($(self.$i.duplicate(),)+)
            }
            fn equals(&self, other: &Self) -> bool {
                $(self.$i.equals(&other.$i))&&+
            }
            fn compare(&self, other: &Self) -> Ordering {
                Ordering::Equal$(.then_with(|| self.$i.compare(&other.$i)))+
            }
            fn hash(&self) -> u32 {
                0 $(^ self.$i.hash())+
            }
            fn format(&self) -> String {
                let parts: &[String] = &[$(self.$i.format()),+];
                format!("{}({})", Self::type_name(), parts.join(", "))
            }
        }
    };
}

tuple_descriptor!(A 0, B 1);
tuple_descriptor!(A 0, B 1, C 2);
tuple_descriptor!(A 0, B 1, C 2, D 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_hashes() {
        assert_eq!(42i32.hash(), 42);
        assert_eq!((-1i32).hash(), u32::MAX);
        assert_eq!(7u32.hash(), 7);
        assert_eq!(((1i64 << 32) | 3).hash(), 3 | 1);
        assert_eq!(5u64.hash(), 5);
        assert_eq!('a'.hash(), 97);
        assert_eq!(true.hash(), 1);
    }

    #[test]
    fn string_hash_is_polynomial() {
        assert_eq!(String::new().hash(), 0);
        assert_eq!("a".to_string().hash(), 97);
        assert_eq!("ab".to_string().hash(), 97 * 31 + 98);
    }

    #[test]
    fn primitive_formats() {
        assert_eq!((-12i32).format(), "-12");
        assert_eq!(u64::MAX.format(), "18446744073709551615");
        assert_eq!('x'.format(), "x");
        assert_eq!(false.format(), "false");
        assert_eq!(().format(), "Void");
        assert_eq!("hi".to_string().format(), "hi");
    }

    #[test]
    fn type_names() {
        assert_eq!(i32::type_name(), "Int32");
        assert_eq!(i64::type_name(), "Int64");
        assert_eq!(u32::type_name(), "UInt32");
        assert_eq!(u64::type_name(), "UInt64");
        assert_eq!(char::type_name(), "Character");
        assert_eq!(bool::type_name(), "Boolean");
        assert_eq!(String::type_name(), "String");
        assert_eq!(<()>::type_name(), "Void");
        assert_eq!(<Option<i32>>::type_name(), "Int32");
        assert_eq!(<(i32, String)>::type_name(), "Tuple<Int32, String>");
    }

    #[test]
    fn tuple_operations() {
        let a = (1i32, 'x');
        let b = (1i32, 'y');
        assert!(a.equals(&a.duplicate()));
        assert!(!a.equals(&b));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(a.hash(), 1 ^ 'x' as u32);
        assert_eq!(a.format(), "Tuple<Int32, Character>(1, x)");

        let t = (2u32, 3u32, 2u32);
        assert_eq!(t.hash(), 3);
        assert_eq!(t.compare(&(2, 3, 1)), Ordering::Greater);

        let q = (1i32, 2i32, 4i32, 8i32);
        assert_eq!(<(i32, i32, i32, i32)>::type_name(), "Tuple<Int32, Int32, Int32, Int32>");
        assert_eq!(q.hash(), 15);
        assert_eq!(q.compare(&(1, 2, 4, 9)), Ordering::Less);
        assert_eq!(q.format(), "Tuple<Int32, Int32, Int32, Int32>(1, 2, 4, 8)");
    }

    #[test]
    fn optional_values_use_absent_semantics() {
        let none: Option<String> = None;
        assert!(none.equals(&None));
        assert!(!none.equals(&Some("a".to_string())));
        assert_eq!(none.hash(), 0);
        assert_eq!(none.format(), "NULL");
        assert_eq!(Some(9i32).format(), "9");
        assert_eq!(Some(9i32).duplicate(), Some(9));
    }
}
