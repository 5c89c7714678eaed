use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use dense_hash::DenseHashTable;
use dense_hash::hash_table::Entry;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Remove every n-th key after filling, to show swap-compaction at work.
    #[arg(short = 'r', long = "remove_every", default_value_t = 0)]
    remove_every: u64,

    /// Start from capacity one instead of pre-sizing.
    #[arg(long)]
    grow: bool,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    let initial = if args.grow { 1 } else { args.target_capacity };
    println!("Creating DenseHashTable with capacity: {}", initial);

    let mut table: DenseHashTable<u64, u64> = DenseHashTable::with_capacity(initial);
    println!(
        "Buckets: {}, capacity: {}",
        table.bucket_count(),
        table.capacity()
    );

    for key in 0..args.target_capacity as u64 {
        let hash = hash_u64(key);
        match table.entry(hash, |&k| k == key) {
            Entry::Vacant(entry) => {
                entry.insert(key, key * key);
            }
            Entry::Occupied(_) => {
                panic!("Key already exists in table: {}", key);
            }
        }
    }

    println!("Inserted {} keys", table.len());

    if args.remove_every > 0 {
        let mut removed = 0;
        for key in (0..args.target_capacity as u64).step_by(args.remove_every as usize) {
            if table.remove(hash_u64(key), |&k| k == key).is_some() {
                removed += 1;
            }
        }
        println!("Removed {} keys, {} remain", removed, table.len());
    }

    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.bucket_count() as f64) * 100.0
    );

    table.chain_histogram().print();
    table.debug_stats().print();
}
