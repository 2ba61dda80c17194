//! HashSet: a `HashTable` whose value slot is the unit type.

use crate::descriptor::Descriptor;
use crate::table::{self, HashTable};
use core::fmt;
use core::iter::FusedIterator;

pub struct HashSet<T: Descriptor> {
    table: HashTable<T, ()>,
}

impl<T: Descriptor> HashSet<T> {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            table: HashTable::new(initial_capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Move `element` into the set. Returns `true` if an equal element was
    /// already present; the stored element is kept and `element` destroyed.
    pub fn put(&mut self, element: T) -> bool {
        self.table.put(element, ())
    }

    pub fn contains(&self, element: &T) -> bool {
        self.table.get(element).is_some()
    }

    /// Borrow the stored element equal to `element`.
    pub fn get(&self, element: &T) -> Option<&T> {
        self.table.get_key_value(element).map(|(k, _)| k)
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn duplicate(&self) -> Self {
        Self {
            table: self.table.duplicate(),
        }
    }

    /// Iterate over elements in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// `Set<Name>{e1, e2}` in slot order.
    pub fn format(&self) -> String {
        let header = format!("Set<{}>", T::type_name());
        self.table.format_entries(header, |k, _| k.format())
    }
}

impl<T: Descriptor> Default for HashSet<T> {
    fn default() -> Self {
        Self::new(table::DEFAULT_CAPACITY)
    }
}

impl<T: Descriptor> Extend<T> for HashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.put(element);
        }
    }
}

impl<T: Descriptor> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: Descriptor> fmt::Display for HashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl<T: Descriptor> fmt::Debug for HashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements = self.format();
        f.debug_struct("HashSet")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("elements", &format_args!("{elements}"))
            .finish()
    }
}

impl<'a, T: Descriptor> IntoIterator for &'a HashSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    inner: table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
