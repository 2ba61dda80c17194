use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use descriptor_table::{HashSet, HashTable};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_put(c: &mut Criterion) {
    c.bench_function("table_put_10k_from_cap_2", |b| {
        b.iter_batched(
            || lcg(1).take(10_000).map(key).collect::<Vec<_>>(),
            |keys| {
                let mut t: HashTable<String, u64> = HashTable::new(2);
                for (i, k) in keys.into_iter().enumerate() {
                    t.put(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("table_get_hit", |b| {
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        let t: HashTable<String, u64> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i as u64))
            .collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("table_get_miss", |b| {
        let t: HashTable<String, u64> = lcg(11)
            .take(10_000)
            .enumerate()
            .map(|(i, x)| (key(x), i as u64))
            .collect();
        let misses: Vec<_> = lcg(0xdead_beef).take(1024).map(key).collect();
        let mut it = misses.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k));
        })
    });
}

fn bench_set_ints(c: &mut Criterion) {
    c.bench_function("set_put_contains_i64", |b| {
        b.iter(|| {
            let mut s: HashSet<i64> = HashSet::new(2);
            for x in lcg(3).take(10_000) {
                s.put(x as i64);
            }
            black_box(s.contains(&42))
        })
    });
}

fn config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_put, bench_get_hit, bench_get_miss, bench_set_ints
}
criterion_main!(benches);
