//! A FIFO queue over a manually managed, growable slot buffer.
//!
//! [`Queue`] reserves its storage uninitialized and manages the lifetime
//! of each element separately from the lifetime of the buffer: values are
//! written into slots on push, moved out on pop, dropped in place on
//! clear, and moved bitwise into a larger region when the buffer grows.
//! This crate is the only one in the workspace that may contain `unsafe`
//! code, and all of it lives in the private `raw` module.
//!
//! # Architecture
//!
//! ```text
//! Queue<T> (growth policy, config, errors, std traits)
//! └── RawRing<T> (head + len over the slots; write/read/drop in place)
//!     └── Slots<T> (allocate/release `cap` uninitialized slots)
//! ```
//!
//! # Example
//!
//! ```
//! use slotq::Queue;
//!
//! let mut q = Queue::new();
//! q.push(1);
//! q.push(2);
//! q.push(3);
//! assert_eq!(q.front(), Some(&1));
//! assert_eq!(q.back(), Some(&3));
//!
//! assert_eq!(q.pop(), Some(1));
//! q.push(4);
//! q.push(5);
//! assert_eq!(q.len(), 4);
//! assert_eq!(q.into_iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod iter;
pub mod queue;
mod raw;

// Public re-exports for the primary API surface.
pub use config::QueueConfig;
pub use error::{PushError, QueueError};
pub use iter::{IntoIter, Iter, IterMut};
pub use queue::Queue;
