//! Integration test: FIFO ordering and amortized growth from the public API.
//!
//! Relocation cost is measured without instrumenting the queue: every
//! time a push changes the capacity, the elements that were live before
//! that push were moved into the new region.

use slotq::{Queue, QueueConfig, QueueError};

/// Push `n` values into `q`, returning the total number of element
/// relocations caused by growth.
fn push_counting_relocations(q: &mut Queue<u64>, n: u64) -> usize {
    let mut relocations = 0;
    for i in 0..n {
        let before = q.capacity();
        let live = q.len();
        q.push(i);
        if q.capacity() != before {
            relocations += live;
        }
    }
    relocations
}

#[test]
fn default_queue_scenario() {
    let q: Queue<u64> = Queue::default();
    assert_eq!(q.len(), 0);
    assert!(q.is_empty());
    assert_eq!(q.capacity(), 1);
}

#[test]
fn push_pop_push_scenario() {
    let mut q = Queue::new();
    for v in [1, 2, 3] {
        q.push(v);
    }
    assert_eq!((q.front(), q.back(), q.len()), (Some(&1), Some(&3), 3));

    q.pop();
    assert_eq!((q.front(), q.len()), (Some(&2), 2));

    q.push(4);
    q.push(5);
    assert_eq!(q.len(), 4);
    assert!(q.capacity() > 1);
    let out: Vec<_> = std::iter::from_fn(|| q.pop()).collect();
    assert_eq!(out, vec![2, 3, 4, 5]);
}

#[test]
fn clear_scenario() {
    let mut q: Queue<u64> = [1, 2, 3].into_iter().collect();
    let cap = q.capacity();
    q.clear();
    assert_eq!(q.len(), 0);
    assert_eq!(q.capacity(), cap);
}

#[test]
fn relocations_are_linear_in_pushes() {
    for n in [1u64, 10, 1_000, 100_000] {
        let mut q = Queue::new();
        let relocations = push_counting_relocations(&mut q, n);
        assert!(
            (relocations as u64) < 2 * n,
            "{relocations} relocations for {n} pushes"
        );
        assert_eq!(q.len() as u64, n);
    }
}

#[test]
fn larger_growth_factor_relocates_less() {
    let n = 50_000;
    let mut doubling = Queue::new();
    let mut tripling = Queue::with_config(QueueConfig::default().growth_factor(3)).unwrap();
    let a = push_counting_relocations(&mut doubling, n);
    let b = push_counting_relocations(&mut tripling, n);
    assert!(b <= a, "factor 3 relocated {b}, factor 2 relocated {a}");
}

#[test]
fn interleaved_fifo_order_survives_many_wraps() {
    let mut q = Queue::with_capacity(5);
    let mut next_in = 0u64;
    let mut next_out = 0u64;
    for round in 0..500 {
        for _ in 0..(round % 7) {
            q.push(next_in);
            next_in += 1;
        }
        for _ in 0..(round % 5) {
            if let Some(v) = q.pop() {
                assert_eq!(v, next_out);
                next_out += 1;
            }
        }
        assert_eq!(q.len() as u64, next_in - next_out);
    }
    for v in q {
        assert_eq!(v, next_out);
        next_out += 1;
    }
    assert_eq!(next_out, next_in);
}

#[test]
fn moved_from_queue_stays_usable() {
    let mut source: Queue<u64> = (0..100).collect();
    let mut dest = source.take();
    assert!(source.is_empty());

    for i in 0..10 {
        source.push(i);
    }
    assert_eq!(source.pop(), Some(0));
    assert_eq!(dest.pop(), Some(0));
    assert_eq!(dest.len(), 99);
}

#[test]
fn reallocate_error_is_descriptive() {
    let mut q: Queue<u64> = Queue::with_capacity(8);
    let err = q.reallocate(8).unwrap_err();
    assert_eq!(
        err,
        QueueError::InvalidCapacity {
            requested: 8,
            current: 8
        }
    );
    assert_eq!(
        err.to_string(),
        "new capacity 8 must be larger than the current capacity 8"
    );
}

#[test]
fn queue_is_send_and_sync_for_plain_data() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Queue<u64>>();
    assert_send_sync::<Queue<String>>();
}

#[test]
fn mutex_wrapped_queue_shared_across_threads() {
    use std::sync::{Arc, Mutex};

    let shared = Arc::new(Mutex::new(Queue::new()));
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for i in 0..250 {
                    shared.lock().unwrap().push(t * 1000 + i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let q = shared.lock().unwrap();
    assert_eq!(q.len(), 1000);
    // Per-producer order is preserved.
    for t in 0..4u64 {
        let mine: Vec<_> = q.iter().filter(|v| **v / 1000 == t).copied().collect();
        assert_eq!(mine, (0..250).map(|i| t * 1000 + i).collect::<Vec<_>>());
    }
}
