//! Benchmark workloads and utilities for the slotq queue.
//!
//! Provides deterministic operation streams shared by the criterion
//! benches and their sanity tests:
//!
//! - [`mixed_workload`]: seeded push/pop mix with a push bias
//! - [`run_workload`]: replay a workload against a [`Queue`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slotq::Queue;

/// One step of a benchmark workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Push the given value.
    Push(u64),
    /// Pop the front element (no-op when empty).
    Pop,
}

/// Build a deterministic stream of `len` operations from `seed`.
///
/// Roughly two pushes for every pop, so the queue grows over the run
/// while still exercising the wrap-around path.
pub fn mixed_workload(len: usize, seed: u64) -> Vec<Op> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            // Knuth MMIX LCG constants.
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            if (state >> 33) % 3 == 0 {
                Op::Pop
            } else {
                Op::Push(i as u64)
            }
        })
        .collect()
}

/// Replay `ops` against `queue`, returning the sum of popped values.
pub fn run_workload(queue: &mut Queue<u64>, ops: &[Op]) -> u64 {
    let mut sum = 0u64;
    for op in ops {
        match *op {
            Op::Push(v) => queue.push(v),
            Op::Pop => {
                if let Some(v) = queue.pop() {
                    sum = sum.wrapping_add(v);
                }
            }
        }
    }
    sum
}
