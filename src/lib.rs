//! descriptor-table: a single-threaded open-addressing hash table and set
//! whose keys and values are driven by per-type descriptors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one table implementation that works over any stored type while
//!   keeping ownership explicit: who owns a value, and when it is released.
//! - Layers:
//!   - `Descriptor`: per-type destroy / duplicate / equals / compare /
//!     hash / format, resolved statically.
//!   - `dispatch`: absent-aware wrappers over `Option<&T>`; `Option<T>`
//!     is itself a descriptor built on them.
//!   - `HashTable<K, V>`: linear probing over a power-of-two slot array.
//!   - `HashSet<T>`: a `HashTable<T, ()>`.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync`.
//! - `len < capacity` at all times; growth (doubling) happens before an
//!   insertion once `len + 1 >= capacity * 3 / 4`.
//! - No single-key removal; `clear` and drop release everything.
//! - No shrinking.
//!
//! Ownership
//! - `put` moves key and value in. On a duplicate key the stored key is
//!   kept and the incoming key is destroyed; the old value is destroyed and
//!   replaced.
//! - `get` borrows; the borrow cannot outlive the next mutation.
//! - `clear` and `Drop` call `Descriptor::destroy` once per stored value.
//!
//! Failure policy
//! - There is no recoverable error path. Allocation failure logs the
//!   requested size and aborts. Contract violations (unsupported
//!   `duplicate`/`compare`, comparing absent values, capacity overflow)
//!   panic.
//!
//! Reentrancy
//! - Descriptor callbacks run while a container operation is in progress.
//!   A debug-only guard panics if such a callback re-enters the same
//!   container.
//!
//! Iteration order
//! - Iteration and formatting follow ascending slot order. That order
//!   depends on insertion history and is not part of the contract.

pub mod descriptor;
pub mod dispatch;
mod primitives;
mod reentrancy;
pub mod set;
mod slots;
pub mod table;
mod table_proptest;

// Public surface
pub use descriptor::Descriptor;
pub use primitives::str_hash;
pub use set::HashSet;
pub use table::HashTable;
#[cfg(feature = "bench_internal")]
pub use table::ProbeStats;
