use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use tri_hash::HashTable;

#[derive(Parser, Debug)]
struct Args {
    /// Number of entries to fill the table with.
    #[arg(short = 'n', long = "entries", default_value_t = 10_000)]
    entries: u64,

    /// Remove-and-reinsert rounds to run over the key set.
    #[arg(short = 'c', long = "churn_rounds", default_value_t = 2)]
    churn_rounds: u32,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn print_histogram(histogram: &[usize]) {
    println!("Probe length histogram:");
    let total: usize = histogram.iter().sum();
    for (length, count) in histogram.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        println!(
            "  {:>3} probes: {:>8} ({:.2}%)",
            length,
            count,
            *count as f64 / total as f64 * 100.0
        );
    }
}

fn main() {
    let args = Args::parse();

    println!("Filling table with {} entries...", args.entries);
    let mut table: HashTable<u64, u64> = HashTable::new();
    for key in 0..args.entries {
        table.insert(hash_u64(key), |a, b| a == b, key, key);
    }

    println!("Entries: {}", table.len());
    println!("Capacity before next grow: {}", table.capacity());
    table.debug_stats().print();
    print_histogram(&table.probe_histogram());

    println!();
    println!(
        "Churning: {} rounds of remove half / reinsert half...",
        args.churn_rounds
    );
    for _ in 0..args.churn_rounds {
        for key in (0..args.entries).step_by(2) {
            table.remove(hash_u64(key), |&stored| stored == key);
        }
        for key in (0..args.entries).step_by(2) {
            table.insert(hash_u64(key), |a, b| a == b, key, key);
        }
    }
    table.debug_stats().print();
    print_histogram(&table.probe_histogram());

    println!();
    println!("Removing three quarters and shrinking to fit...");
    table.retain(|&key, _| key % 4 == 0);
    table.shrink_to_fit();
    table.debug_stats().print();
    print_histogram(&table.probe_histogram());
}
