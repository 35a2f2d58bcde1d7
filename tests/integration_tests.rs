// tests/integration_tests.rs
//! Integration tests for the buffer pools

use freebuf::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const BACKENDS: [Backend; 2] = [Backend::GuardedList, Backend::BoundedQueue];

fn scenario_config(backend: Backend) -> PoolConfig {
    PoolConfig {
        initial_capacity: 1024,
        max_retained_capacity: 2048,
        max_pool_size: 2,
        ..PoolConfig::default()
    }
    .with_backend(backend)
}

#[test]
fn test_end_to_end_bounds() {
    for backend in BACKENDS {
        let pool = BufferPool::new(scenario_config(backend));

        // pre-seed with two 1024-byte buffers
        pool.put(Buffer::with_capacity(1024));
        pool.put(Buffer::with_capacity(1024));
        assert_eq!(pool.available(), 2);

        let mut first = pool.get();
        let second = pool.get();
        assert_eq!(pool.available(), 0, "{:?}", backend);

        // grow one buffer past the retained-capacity bound
        first.put_bytes(&[0x42; 4096]).unwrap();
        assert!(first.capacity() >= 4096);
        pool.put(first);
        assert_eq!(pool.available(), 0, "{:?}: oversized buffer retained", backend);

        pool.put(second);
        assert_eq!(pool.available(), 1);
        pool.put(Buffer::with_capacity(1024));
        assert_eq!(pool.available(), 2);
        pool.put(Buffer::with_capacity(1024));
        assert_eq!(pool.available(), 2, "{:?}: pool grew past max", backend);

        let stats = pool.stats();
        assert_eq!(stats.dropped_oversized, 1);
        assert_eq!(stats.dropped_full, 1);
        assert_eq!(stats.retained, 4);
        assert_eq!(stats.allocated, 0);
    }
}

#[test]
fn test_retained_buffer_comes_back_empty() {
    for backend in BACKENDS {
        let pool = BufferPool::new(PoolConfig::small().with_backend(backend));

        let mut buf = pool.get();
        buf.put_bytes(b"previous user's data").unwrap();
        let cap = buf.capacity();
        pool.put(buf);

        let reused = pool.get();
        assert_eq!(reused.len(), 0);
        assert_eq!(reused.capacity(), cap);
        assert_eq!(pool.stats().hits(), 1);
    }
}

#[test]
fn test_get_on_empty_pool_is_usable() {
    for backend in BACKENDS {
        for config in [PoolConfig::unbounded(), PoolConfig::network()] {
            let pool = BufferPool::new(config.with_backend(backend));
            let mut buf = pool.get();
            assert!(buf.is_empty());
            buf.put_byte(1).unwrap();
            assert_eq!(buf.len(), 1);
        }
    }
}

#[test]
fn test_unbounded_pool_keeps_everything() {
    for backend in BACKENDS {
        let pool = BufferPool::new(PoolConfig::unbounded().with_backend(backend));
        for size in [0, 16, 1 << 16, 1 << 20] {
            pool.put(Buffer::with_capacity(size));
        }
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.stats().dropped(), 0);
    }
}

#[test]
fn test_zero_on_release() {
    for backend in BACKENDS {
        let pool = BufferPool::new(
            PoolConfig::small()
                .with_backend(backend)
                .with_zero_on_release(true),
        );

        let mut buf = pool.get();
        buf.put_bytes(&[0xFF; 64]).unwrap();
        pool.put(buf);

        let mut reused = pool.get();
        assert!(reused.is_empty());
        // newly written bytes come only from the new user
        reused.put_bytes(&[1, 2, 3]).unwrap();
        assert_eq!(reused.as_slice(), &[1, 2, 3]);
    }
}

/// Many threads hammer a pool of size K while an observer checks the bound.
fn stress(backend: Backend) {
    const MAX_POOL: usize = 8;
    const THREADS: usize = MAX_POOL * 2;
    const ITERATIONS: usize = 200;
    const BUF_SIZE: usize = 4 * 1024;

    let pool = BufferPool::new(
        PoolConfig {
            initial_capacity: BUF_SIZE,
            max_retained_capacity: BUF_SIZE * 2,
            max_pool_size: MAX_POOL,
            ..PoolConfig::default()
        }
        .with_backend(backend),
    );
    pool.seed(MAX_POOL / 2);

    let done = AtomicBool::new(false);

    let max_seen = thread::scope(|s| {
        let observer = s.spawn(|| {
            let mut max_seen = 0;
            while !done.load(Ordering::Acquire) {
                max_seen = max_seen.max(pool.available());
                thread::yield_now();
            }
            max_seen
        });

        let workers: Vec<_> = (0..THREADS)
            .map(|t| {
                let pool = &pool;
                s.spawn(move || {
                    for i in 0..ITERATIONS {
                        let mut buf = pool.acquire();
                        // sizes straddle the retained-capacity bound
                        let extra = (t * 977 + i * 131) % (BUF_SIZE * 2);
                        for b in 0..BUF_SIZE / 2 + extra {
                            buf.put_byte((b % 256) as u8).unwrap();
                        }
                        assert!(!buf.is_empty());
                    }
                })
            })
            .collect();

        for w in workers {
            w.join().unwrap();
        }
        done.store(true, Ordering::Release);
        observer.join().unwrap()
    });

    assert!(max_seen <= MAX_POOL, "{:?}: saw {} idle buffers", backend, max_seen);

    let stats = pool.stats();
    assert!(stats.available <= MAX_POOL);
    assert_eq!(stats.acquired, THREADS * ITERATIONS);
    assert_eq!(stats.released, THREADS * ITERATIONS + MAX_POOL / 2);
    assert_eq!(
        stats.released,
        stats.retained + stats.dropped_oversized + stats.dropped_full
    );
}

#[test]
fn test_list_pool_concurrency() {
    stress(Backend::GuardedList);
}

#[test]
fn test_queue_pool_concurrency() {
    stress(Backend::BoundedQueue);
}

#[test]
fn test_arc_shared_pool() {
    let pool = Arc::new(ListPool::new(PoolConfig {
        initial_capacity: 1024,
        max_retained_capacity: 4096,
        max_pool_size: 100,
        ..PoolConfig::default()
    }));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for j in 0..100u32 {
                    let mut buf = pool.get();
                    buf.put_u32(i * 100 + j).unwrap();
                    buf.put_bytes(b"thread data").unwrap();
                    pool.put(buf);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = pool.stats();
    assert_eq!(stats.acquired, 1000);
    assert!(stats.available <= 10);
    assert!(stats.hit_rate() > 0.0);
}

#[test]
fn test_failed_worker_still_releases() {
    fn work(pool: &QueuePool, fail_at: usize) -> freebuf::Result<()> {
        let mut buf = pool.acquire();
        for i in 0..64 {
            if i == fail_at {
                return Err(BufferError::InvalidConfig("simulated failure".into()));
            }
            buf.put_byte(i as u8)?;
        }
        Ok(())
    }

    let pool = QueuePool::new(PoolConfig::small());
    assert!(work(&pool, 10).is_err());
    assert!(work(&pool, usize::MAX).is_ok());

    let stats = pool.stats();
    assert_eq!(stats.acquired, 2);
    assert_eq!(stats.released, 2);
    assert_eq!(stats.allocated, 1);
    assert_eq!(pool.available(), 1);
}
