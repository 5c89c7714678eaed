use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use dense_hash::DenseHashMap;
use dense_hash::DenseHashTable;
use dense_hash::comparer::DefaultComparer;
use dense_hash::hash_table::Entry as DenseEntry;
use hashbrown::HashMap as HashbrownMap;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::distr;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy, Default)]
struct SipBuilder;

impl BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;

    fn hash_key(&self) -> u64 {
        SipBuilder.hash_one(self)
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct SmallKey(u64);

impl BenchKey for SmallKey {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

/// Payload stored next to every key; large enough that contiguity matters
/// when walking values.
#[derive(Clone, Copy)]
struct Payload([u64; 4]);

impl Payload {
    fn new(key: u64) -> Self {
        Self([key, key.rotate_left(16), key.rotate_left(32), !key])
    }
}

type DenseMap<K> = DenseHashMap<K, Payload, DefaultComparer<SipBuilder>>;

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_keys<K: BenchKey>(count: usize) -> Vec<(u64, K)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let key = K::new(rng.try_next_u64().unwrap());
            (key.hash_key(), key)
        })
        .collect()
}

fn filled_dense<K: BenchKey>(keys: &[(u64, K)]) -> DenseHashTable<K, Payload> {
    let mut table = DenseHashTable::with_capacity(0);
    for (i, (hash, key)) in keys.iter().enumerate() {
        table.insert(*hash, key.clone(), Payload::new(i as u64), |k| k == key);
    }
    table
}

fn filled_hashbrown<K: BenchKey>(keys: &[(u64, K)]) -> HashbrownHashTable<(K, Payload)> {
    let mut table = HashbrownHashTable::with_capacity(0);
    for (i, (hash, key)) in keys.iter().enumerate() {
        match table.entry(*hash, |(k, _)| k == key, |(k, _)| k.hash_key()) {
            HashbrownEntry::Vacant(entry) => {
                entry.insert((key.clone(), Payload::new(i as u64)));
            }
            HashbrownEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("dense_hash", |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut table = DenseHashTable::<K, Payload>::with_capacity(0);
                    for (i, (hash, key)) in keys.into_iter().enumerate() {
                        match table.entry(hash, |k| *k == key) {
                            DenseEntry::Vacant(entry) => {
                                black_box(entry.insert(key, Payload::new(i as u64)));
                            }
                            DenseEntry::Occupied(_) => unreachable!(),
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut table = HashbrownHashTable::<(K, Payload)>::with_capacity(0);
                    for (i, (hash, key)) in keys.into_iter().enumerate() {
                        match table.entry(hash, |(k, _)| *k == key, |(k, _)| k.hash_key()) {
                            HashbrownEntry::Vacant(entry) => {
                                black_box(entry.insert((key, Payload::new(i as u64))));
                            }
                            HashbrownEntry::Occupied(_) => unreachable!(),
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let hits = (0..size as u64 * 2)
            .step_by(2)
            .map(|key| {
                let key = K::new(key);
                (key.hash_key(), key)
            })
            .collect::<Vec<_>>();
        let mut lookups = (0..size as u64 * 2)
            .map(|key| {
                let key = K::new(key);
                (key.hash_key(), key)
            })
            .collect::<Vec<_>>();
        lookups.shuffle(&mut SmallRng::from_os_rng());

        let dense_table = filled_dense(&hits);
        let hashbrown_table = filled_hashbrown(&hits);

        group.throughput(Throughput::Elements(lookups.len() as u64));
        group.bench_function("dense_hash", |b| {
            b.iter(|| {
                for (hash, key) in lookups.iter() {
                    black_box(dense_table.find_value(*hash, |k| k == key));
                }
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                for (hash, key) in lookups.iter() {
                    black_box(hashbrown_table.find(*hash, |(k, _)| k == key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let dense_table = filled_dense(&keys);
        let hashbrown_table = filled_hashbrown(&keys);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("dense_hash", |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    (dense_table.clone(), keys)
                },
                |(mut table, keys)| {
                    for (hash, key) in keys.iter() {
                        black_box(table.remove(*hash, |k| k == key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    (hashbrown_table.clone(), keys)
                },
                |(mut table, keys)| {
                    for (hash, key) in keys.iter() {
                        if let Ok(entry) = table.find_entry(*hash, |(k, _)| k == key) {
                            black_box(entry.remove().0);
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Sums a field of every value, the workload dense storage is built for.
fn bench_value_scan<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("value_scan_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);

        let mut dense_map = DenseMap::<K>::with_capacity(0);
        let mut hashbrown_map = HashbrownMap::with_hasher(SipBuilder);
        for (i, (_, key)) in keys.iter().enumerate() {
            dense_map.insert(key.clone(), Payload::new(i as u64));
            hashbrown_map.insert(key.clone(), Payload::new(i as u64));
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("dense_hash", |b| {
            b.iter(|| {
                let total = dense_map
                    .values()
                    .iter()
                    .fold(0u64, |acc, p| acc.wrapping_add(p.0[1]));
                black_box(total)
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                let total = hashbrown_map
                    .values()
                    .fold(0u64, |acc, p| acc.wrapping_add(p.0[1]));
                black_box(total)
            })
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

fn bench_mixed_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    const KEY_SPACE_MULTIPLIER: f32 = 2.0;

    for &size in SIZES[..=MAX_SIZE].iter() {
        let mut rng = SmallRng::from_os_rng();
        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(distr::Uniform::new(0.0, 1.0).unwrap());
                if op_choice < 0.5 {
                    Operation::Find
                } else if op_choice < 0.75 {
                    Operation::Insert
                } else {
                    Operation::Remove
                }
            })
            .collect::<Vec<_>>();

        let key_distr = Zipf::new(size as f32 * KEY_SPACE_MULTIPLIER - 1.0, 1.0).unwrap();
        let keys = operations
            .iter()
            .map(|_| {
                let key = K::new(rng.sample(key_distr) as u64);
                (key.hash_key(), key)
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(operations.len() as u64));
        group.bench_function("dense_hash", |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut table = DenseHashTable::<K, Payload>::with_capacity(0);
                    for (op, (hash, key)) in operations.iter().zip(keys) {
                        match op {
                            Operation::Insert => match table.entry(hash, |k| *k == key) {
                                DenseEntry::Vacant(entry) => {
                                    black_box(entry.insert(key, Payload::new(hash)));
                                }
                                DenseEntry::Occupied(mut entry) => {
                                    entry.insert(Payload::new(hash));
                                }
                            },
                            Operation::Remove => {
                                black_box(table.remove(hash, |k| *k == key));
                            }
                            Operation::Find => {
                                black_box(table.find(hash, |k| *k == key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut table = HashbrownHashTable::<(K, Payload)>::with_capacity(0);
                    for (op, (hash, key)) in operations.iter().zip(keys) {
                        match op {
                            Operation::Insert => {
                                match table.entry(hash, |(k, _)| *k == key, |(k, _)| k.hash_key()) {
                                    HashbrownEntry::Vacant(entry) => {
                                        black_box(entry.insert((key, Payload::new(hash))));
                                    }
                                    HashbrownEntry::Occupied(mut entry) => {
                                        entry.get_mut().1 = Payload::new(hash);
                                    }
                                }
                            }
                            Operation::Remove => {
                                if let Ok(entry) = table.find_entry(hash, |(k, _)| *k == key) {
                                    black_box(entry.remove().0);
                                }
                            }
                            Operation::Find => {
                                black_box(table.find(hash, |(k, _)| *k == key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallKey, 4>,
    bench_insert_random::<StringKey, 3>,
    bench_find_hit_miss::<SmallKey, 4>,
    bench_find_hit_miss::<StringKey, 3>,
    bench_remove::<SmallKey, 4>,
    bench_remove::<StringKey, 3>,
    bench_value_scan::<SmallKey, 4>,
    bench_value_scan::<StringKey, 3>,
    bench_mixed_zipf::<SmallKey, 4>,
    bench_mixed_zipf::<StringKey, 3>,
);

criterion_main!(benches);
