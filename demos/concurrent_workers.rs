// demos/concurrent_workers.rs
//! Many workers share one bounded pool; some of them fail halfway through.
//!
//! Run with `RUST_LOG=freebuf=trace` to see every discarded buffer.

use anyhow::{Context, bail};
use freebuf::prelude::*;
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

const BUF_SIZE: usize = 32 * 1024;
const POOL_SIZE: usize = 50;
const ITERATIONS: usize = 100;

/// Fills a pooled buffer with `BUF_SIZE +/- BUF_SIZE / 2` bytes.
///
/// The buffer goes back to the pool on every exit path, including the early
/// failure return.
fn grab_buffer_and_use_it(pool: &BufferPool, worker: usize, round: usize) -> anyhow::Result<()> {
    let mut buf = pool.acquire();

    let len = BUF_SIZE / 2 + (worker * 7919 + round * 104_729) % BUF_SIZE;
    // roughly one call in a hundred gives up halfway
    let fail_at = ((worker * 31 + round * 17) % 97 == 0).then_some(len / 2);

    for i in 0..len {
        if fail_at == Some(i) {
            bail!("worker {} failed in round {} after {} bytes", worker, round, i);
        }
        buf.put_byte((i % 256) as u8)
            .with_context(|| format!("worker {} round {}", worker, round))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend = match std::env::args().nth(1).as_deref() {
        Some("queue") => Backend::BoundedQueue,
        _ => Backend::GuardedList,
    };

    let pool = Arc::new(BufferPool::try_new(
        PoolConfig {
            initial_capacity: BUF_SIZE,
            max_retained_capacity: BUF_SIZE * 2,
            max_pool_size: POOL_SIZE,
            ..PoolConfig::default()
        }
        .with_backend(backend),
    )?);

    // optionally fill the pool with pre-allocated buffers
    pool.seed(POOL_SIZE);
    println!("{} pool seeded with {} buffers", backend.name(), pool.available());

    let handles: Vec<_> = (0..POOL_SIZE)
        .map(|worker| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let mut failures = 0;
                for round in 0..ITERATIONS {
                    if let Err(e) = grab_buffer_and_use_it(&pool, worker, round) {
                        eprintln!("{:#}", e);
                        failures += 1;
                    }
                }
                failures
            })
        })
        .collect();

    let mut failures = 0;
    for h in handles {
        failures += h.join().map_err(|_| anyhow::anyhow!("worker panicked"))?;
    }

    let stats = pool.stats();
    println!("failures:          {}", failures);
    println!("acquired:          {}", stats.acquired);
    println!("allocated:         {}", stats.allocated);
    println!("hit rate:          {:.1}%", stats.hit_rate());
    println!("dropped oversized: {}", stats.dropped_oversized);
    println!("dropped full:      {}", stats.dropped_full);
    println!("idle at exit:      {} (max {})", stats.available, POOL_SIZE);

    Ok(())
}
