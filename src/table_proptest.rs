#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can reach the
// slot-level invariants without feature gates.

use crate::descriptor::Descriptor;
use crate::table::HashTable;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;

// Key that tracks how many instances are alive, so leaks and lost values
// show up as a non-zero balance once everything is dropped.
struct Live {
    name: String,
    alive: Rc<Cell<i64>>,
}

impl Live {
    fn new(name: &str, alive: &Rc<Cell<i64>>) -> Self {
        alive.set(alive.get() + 1);
        Self {
            name: name.to_owned(),
            alive: alive.clone(),
        }
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        self.alive.set(self.alive.get() - 1);
    }
}

impl Descriptor for Live {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Live")
    }
    fn duplicate(&self) -> Self {
        Live::new(&self.name, &self.alive)
    }
    fn equals(&self, other: &Self) -> bool {
        self.name == other.name
    }
    fn hash(&self) -> u32 {
        crate::primitives::str_hash(&self.name)
    }
    fn format(&self) -> String {
        self.name.clone()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Get(usize),
    Contains(String),
    Clear,
    Iterate,
    Duplicate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    let capacity = 0usize..=8;
    let pool = proptest::collection::vec("[a-z]{0,4}", 1..=24);
    (capacity, pool).prop_flat_map(|(capacity, pool)| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            3 => idx.clone().prop_map(Op::Get),
            2 => "[a-z]{0,4}".prop_map(Op::Contains),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
            1 => Just(Op::Duplicate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (capacity, pool.clone(), ops))
    })
}

fn assert_shape<K: Descriptor, V: Descriptor>(t: &HashTable<K, V>) -> Result<(), TestCaseError> {
    prop_assert!(t.capacity().is_power_of_two());
    prop_assert!(t.len() < t.capacity(), "len {} capacity {}", t.len(), t.capacity());
    prop_assert_eq!(t.iter().count(), t.len());
    Ok(())
}

// Property: state-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - `put` reports presence exactly when the model already held the key.
// - `get`/`contains` agree with the model; the latest value wins.
// - `len < capacity` and capacity is a power of two after every op.
// - `iter` yields each live entry exactly once.
// - `clear` empties the table without shrinking it.
// - Every created key is released exactly once by the end.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let alive = Rc::new(Cell::new(0i64));
        {
            let mut sut: HashTable<Live, i32> = HashTable::new(capacity);
            let mut model: HashMap<String, i32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Put(i, v) => {
                        let name = &pool[i];
                        let already = model.insert(name.clone(), v).is_some();
                        prop_assert_eq!(sut.put(Live::new(name, &alive), v), already);
                    }
                    Op::Get(i) => {
                        let lookup = Live::new(&pool[i], &alive);
                        prop_assert_eq!(sut.get(&lookup), model.get(&pool[i]));
                    }
                    Op::Contains(name) => {
                        let lookup = Live::new(&name, &alive);
                        prop_assert_eq!(sut.contains(&lookup), model.contains_key(&name));
                    }
                    Op::Clear => {
                        let before = sut.capacity();
                        sut.clear();
                        model.clear();
                        prop_assert_eq!(sut.capacity(), before);
                    }
                    Op::Iterate => {
                        let mut seen: HashMap<String, i32> = HashMap::new();
                        for (k, v) in sut.iter() {
                            prop_assert!(seen.insert(k.name.clone(), *v).is_none());
                        }
                        prop_assert_eq!(&seen, &model);
                    }
                    Op::Duplicate => {
                        let copy = sut.duplicate();
                        prop_assert_eq!(copy.format(), sut.format());
                        assert_shape(&copy)?;
                    }
                }
                prop_assert_eq!(sut.len(), model.len());
                assert_shape(&sut)?;
                // Only the stored keys are alive between operations.
                prop_assert_eq!(alive.get(), sut.len() as i64);
            }
        }
        prop_assert_eq!(alive.get(), 0);
    }
}

// Property: N distinct keys inserted into a small table are all retrievable
// regardless of how many times it grew.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_keeps_every_key(keys in proptest::collection::hash_set(any::<i64>(), 0..300)) {
        let mut t: HashTable<i64, i64> = HashTable::new(2);
        for &k in &keys {
            prop_assert!(!t.put(k, k.wrapping_mul(3)));
            assert_shape(&t)?;
        }
        prop_assert_eq!(t.len(), keys.len());
        for &k in &keys {
            prop_assert_eq!(t.get(&k), Some(&k.wrapping_mul(3)));
        }
    }
}

// Property: replacing a key keeps the count and exposes only the newest value.
proptest! {
    #[test]
    fn prop_replace_is_idempotent_on_count(key in "[a-z]{0,8}", v1 in any::<u32>(), v2 in any::<u32>()) {
        let mut t: HashTable<String, u32> = HashTable::new(4);
        prop_assert!(!t.put(key.clone(), v1));
        let len = t.len();
        prop_assert!(t.put(key.clone(), v2));
        prop_assert_eq!(t.len(), len);
        prop_assert_eq!(t.get(&key), Some(&v2));
    }
}
