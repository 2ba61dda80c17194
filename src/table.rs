//! HashTable: open addressing with linear probing over descriptor-driven
//! keys and values.
//!
//! Layout and invariants
//! - One slot array whose length (`capacity`) is always a power of two.
//! - `len < capacity` after every operation, so a probe for a missing key
//!   always ends at an empty slot.
//! - Before an insertion, if `len + 1 >= capacity * 3 / 4` the table doubles
//!   and re-places every entry first.
//! - The table owns every stored key and value and releases them through
//!   `Descriptor::destroy` when they are replaced, cleared or dropped.

use crate::descriptor::Descriptor;
use crate::reentrancy::DebugReentrancy;
use crate::slots::{self, Slot};
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// Load factor numerator / denominator (0.75).
pub const LOAD_FACTOR_NUM: usize = 3;
pub const LOAD_FACTOR_DEN: usize = 4;

/// Capacity used by `Default` and `FromIterator`.
pub const DEFAULT_CAPACITY: usize = 16;

pub struct HashTable<K: Descriptor, V: Descriptor> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    guard: DebugReentrancy,
}

impl<K: Descriptor, V: Descriptor> HashTable<K, V> {
    /// Create an empty table. The capacity request is rounded up to the next
    /// power of two (at least 1).
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            slots: slots::allocate(slots::round_capacity(initial_capacity)),
            len: 0,
            guard: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Move `key` and `value` into the table.
    ///
    /// Returns `true` if an equal key was already present. In that case the
    /// stored key is kept, the incoming key is destroyed, and the stored
    /// value is destroyed and replaced by `value`. The entry count does not
    /// change on replace.
    pub fn put(&mut self, key: K, value: V) -> bool {
        // Only `slots` and `len` are touched while the guard is held.
        let _g = self.guard.enter("put");
        if needs_growth(self.slots.len(), self.len) {
            grow(&mut self.slots, self.len);
        }
        let replaced = place(&mut self.slots, &mut self.len, key, value);
        debug_assert!(self.len < self.slots.len());
        replaced
    }

    /// Borrow the value stored under `key`. The borrow ends at the next
    /// mutation of the table.
    pub fn get(&self, key: &K) -> Option<&V> {
        let _g = self.guard.enter("get");
        match &self.slots[find_slot(&self.slots, key)] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty => None,
        }
    }

    /// Borrow the stored key equal to `key` together with its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let _g = self.guard.enter("get_key_value");
        match &self.slots[find_slot(&self.slots, key)] {
            Slot::Occupied { key, value } => Some((key, value)),
            Slot::Empty => None,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        let _g = self.guard.enter("contains");
        self.slots[find_slot(&self.slots, key)].is_occupied()
    }

    /// Destroy every stored key and value. Capacity is unchanged.
    pub fn clear(&mut self) {
        let _g = self.guard.enter("clear");
        log::debug!(
            "clearing table of {} entries ({} slots)",
            self.len,
            self.capacity()
        );
        for slot in self.slots.iter_mut() {
            if let Slot::Occupied { key, value } = mem::replace(slot, Slot::Empty) {
                key.destroy();
                value.destroy();
            }
        }
        self.len = 0;
    }

    /// Deep copy through the descriptors' `duplicate`. The copy has the same
    /// capacity and slot layout, so it iterates in the same order.
    pub fn duplicate(&self) -> Self {
        let _g = self.guard.enter("duplicate");
        let mut slots = slots::allocate(self.capacity());
        for (dst, src) in slots.iter_mut().zip(&self.slots) {
            if let Slot::Occupied { key, value } = src {
                *dst = Slot::Occupied {
                    key: key.duplicate(),
                    value: value.duplicate(),
                };
            }
        }
        Self {
            slots,
            len: self.len,
            guard: DebugReentrancy::new(),
        }
    }

    /// Iterate over `(key, value)` pairs in ascending slot order. Slot order
    /// depends on insertion history and is not a semantic order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// `Table<KeyName, ValueName>{k1: v1, k2: v2}` in slot order.
    pub fn format(&self) -> String {
        let header = format!("Table<{}, {}>", K::type_name(), V::type_name());
        self.format_entries(header, |k, v| format!("{}: {}", k.format(), v.format()))
    }

    pub(crate) fn format_entries<F>(&self, header: String, mut entry: F) -> String
    where
        F: FnMut(&K, &V) -> String,
    {
        let _g = self.guard.enter("format");
        let mut out = header;
        out.push('{');
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&entry(k, v));
        }
        out.push('}');
        out
    }

    /// Probe-length statistics over the current layout.
    #[cfg(feature = "bench_internal")]
    pub fn probe_stats(&self) -> ProbeStats {
        let _g = self.guard.enter("probe_stats");
        let mask = self.slots.len() - 1;
        let mut stats = ProbeStats::default();
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { key, .. } = slot {
                let home = key.hash() as usize & mask;
                let distance = index.wrapping_sub(home) & mask;
                stats.entries += 1;
                stats.total += distance;
                stats.longest = stats.longest.max(distance);
            }
        }
        stats
    }
}

#[inline]
fn needs_growth(capacity: usize, len: usize) -> bool {
    len + 1 >= capacity * LOAD_FACTOR_NUM / LOAD_FACTOR_DEN
}

/// Index of the slot holding a key equal to `key`, or of the empty slot
/// that ends its probe sequence. Terminates because `len < capacity`.
fn find_slot<K: Descriptor, V>(slots: &[Slot<K, V>], key: &K) -> usize {
    let mask = slots.len() - 1;
    let mut index = key.hash() as usize & mask;
    loop {
        match &slots[index] {
            Slot::Occupied { key: stored, .. } if !stored.equals(key) => {
                index = (index + 1) & mask;
            }
            _ => return index,
        }
    }
}

fn place<K: Descriptor, V: Descriptor>(
    slots: &mut [Slot<K, V>],
    len: &mut usize,
    key: K,
    value: V,
) -> bool {
    let index = find_slot(slots, &key);
    let slot = &mut slots[index];
    if let Slot::Occupied { value: stored, .. } = slot {
        let old = mem::replace(stored, value);
        key.destroy();
        old.destroy();
        return true;
    }
    *slot = Slot::Occupied { key, value };
    *len += 1;
    false
}

/// Double the capacity and re-place every entry.
///
/// Target slots are computed first, from `hash` alone: stored keys are
/// pairwise distinct, so no `equals` call is needed. If `hash` unwinds the
/// table is left exactly as it was. Entries are moved only afterwards, and
/// that phase runs no descriptor code.
fn grow<K: Descriptor, V>(slots: &mut Vec<Slot<K, V>>, len: usize) {
    let old_capacity = slots.len();
    let new_capacity = old_capacity
        .checked_mul(2)
        .unwrap_or_else(|| panic!("capacity overflow: cannot grow past {old_capacity} slots"));
    log::trace!(
        "rehashing table of {} entries from {} to {} slots",
        len,
        old_capacity,
        new_capacity
    );

    let mask = new_capacity - 1;
    let mut taken = vec![false; new_capacity];
    let mut targets = Vec::with_capacity(len);
    for slot in slots.iter() {
        if let Slot::Occupied { key, .. } = slot {
            let mut index = key.hash() as usize & mask;
            while taken[index] {
                index = (index + 1) & mask;
            }
            taken[index] = true;
            targets.push(index);
        }
    }
    debug_assert_eq!(targets.len(), len);

    let mut fresh = crate::slots::allocate(new_capacity);
    let occupied = slots.drain(..).filter(Slot::is_occupied);
    for (slot, index) in occupied.zip(targets) {
        fresh[index] = slot;
    }
    *slots = fresh;
}

/// Distance of each entry from its home slot.
#[cfg(feature = "bench_internal")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeStats {
    pub entries: usize,
    pub total: usize,
    pub longest: usize,
}

impl<K: Descriptor, V: Descriptor> Drop for HashTable<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Descriptor, V: Descriptor> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K: Descriptor, V: Descriptor> Extend<(K, V)> for HashTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Descriptor, V: Descriptor> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K: Descriptor, V: Descriptor> fmt::Display for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl<K: Descriptor, V: Descriptor> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.format();
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("entries", &format_args!("{entries}"))
            .finish()
    }
}

impl<'a, K: Descriptor, V: Descriptor> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over occupied slots of a `HashTable`.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value } = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}
