//! Demonstration run for the LRU store
//!
//! Fixed sequence of operations on a capacity-2 store, printing each
//! lookup's outcome. Takes no arguments.

use anyhow::Result;
use lrustore::LruStore;
use tracing::info;

fn show(result: Option<i64>) -> String {
    match result {
        Some(value) => value.to_string(),
        None => "(miss)".to_string(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting lru-demo v{}", env!("CARGO_PKG_VERSION"));

    let mut store = LruStore::new(2)?;
    info!("Store created with capacity {}", store.capacity());

    store.put(1, 1);
    store.put(2, 2);
    println!("get(1) -> {}", show(store.get(1)));

    store.put(3, 3); // Evicts key 2
    println!("get(2) -> {}", show(store.get(2)));

    store.put(4, 4); // Evicts key 1
    println!("get(1) -> {}", show(store.get(1)));
    println!("get(3) -> {}", show(store.get(3)));
    println!("get(4) -> {}", show(store.get(4)));

    let stats = store.stats();
    info!(
        "Done: {} hits, {} misses, {} evictions, hit ratio {:.2}",
        stats.hits(),
        stats.misses(),
        stats.evictions(),
        stats.hit_ratio()
    );

    Ok(())
}
