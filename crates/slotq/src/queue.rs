//! The [`Queue`] container.

use std::fmt;

use crate::config::QueueConfig;
use crate::error::{PushError, QueueError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::raw::{self, RawRing};

/// A FIFO queue over a single contiguous, growable buffer.
///
/// Elements are pushed at the back and popped from the front. The buffer
/// is allocated uninitialized; each element is written into its slot when
/// pushed and moved out (or dropped in place) when popped or cleared.
///
/// # Layout
///
/// The buffer is used as a ring: the front element sits at a moving head
/// index and the live elements may wrap past the end of the region. This
/// makes [`pop`](Self::pop) O(1) instead of shifting every remaining
/// element toward slot 0; the FIFO order callers observe is the same.
/// Whenever the buffer is reallocated (or cloned) the elements are laid
/// out again from slot 0.
///
/// # Growth
///
/// A push into a full buffer first grows it to `capacity * growth_factor`
/// slots (doubling by default), so pushes are amortized O(1). Capacity
/// never shrinks: [`clear`](Self::clear) keeps the buffer.
///
/// # Empty queues
///
/// [`front`](Self::front) and [`back`](Self::back) return `None` on an
/// empty queue. [`pop`](Self::pop) and [`clear`](Self::clear) on an empty
/// queue are no-ops.
///
/// # Threading
///
/// `Queue<T>` is `Send` when `T: Send` and `Sync` when `T: Sync`, but it
/// does no synchronization of its own: every mutation takes `&mut self`.
/// Sharing one queue between threads that mutate it requires an external
/// lock such as `Mutex<Queue<T>>`.
///
/// # Reference invalidation
///
/// References returned by `front`, `back`, `get`, or `iter` are
/// invalidated by any later mutation. The borrow checker enforces this:
///
/// ```compile_fail
/// let mut q = slotq::Queue::new();
/// q.push(1);
/// let front = q.front().unwrap();
/// q.push(2); // may reallocate
/// assert_eq!(*front, 1);
/// ```
///
/// ```compile_fail
/// let mut q = slotq::Queue::new();
/// q.push(String::from("a"));
/// let back = q.back().unwrap();
/// q.pop();
/// println!("{back}");
/// ```
pub struct Queue<T> {
    ring: RawRing<T>,
    growth_factor: usize,
}

impl<T> Queue<T> {
    /// Create an empty queue with a single reserved slot.
    pub fn new() -> Self {
        Self::with_capacity(QueueConfig::DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty queue with room for `capacity` elements.
    ///
    /// A capacity of 0 is rounded up to 1.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `isize::MAX` bytes. Allocation
    /// failure aborts through [`std::alloc::handle_alloc_error`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: RawRing::allocate(capacity.max(1)),
            growth_factor: QueueConfig::DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Create an empty queue from a validated [`QueueConfig`].
    ///
    /// Fails with [`QueueError::InvalidConfig`] for out-of-range
    /// parameters, or with an allocation error if the initial buffer
    /// cannot be reserved.
    pub fn with_config(config: QueueConfig) -> Result<Self, QueueError> {
        if let Err(err) = config.validate() {
            tracing::debug!("rejected queue config: {err}");
            return Err(err);
        }
        Ok(Self {
            ring: RawRing::try_allocate(config.initial_capacity)?,
            growth_factor: config.growth_factor,
        })
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    /// Number of element slots currently reserved.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Multiplier applied to the capacity when a push finds the buffer full.
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// The oldest element, or `None` if the queue is empty.
    pub fn front(&self) -> Option<&T> {
        self.ring.get(0)
    }

    /// Mutable access to the oldest element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.ring.get_mut(0)
    }

    /// The newest element, or `None` if the queue is empty.
    pub fn back(&self) -> Option<&T> {
        let last = self.len().checked_sub(1)?;
        self.ring.get(last)
    }

    /// Mutable access to the newest element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len().checked_sub(1)?;
        self.ring.get_mut(last)
    }

    /// The element `index` positions behind the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.ring.get(index)
    }

    /// Mutable access to the element `index` positions behind the front.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.ring.get_mut(index)
    }

    /// Append `value` at the back, growing the buffer if it is full.
    ///
    /// # Panics
    ///
    /// Panics if the grown capacity overflows. Allocation failure aborts
    /// through [`std::alloc::handle_alloc_error`]. Use
    /// [`try_push`](Self::try_push) to handle both as errors.
    pub fn push(&mut self, value: T) {
        if let Err(rejected) = self.try_push(value) {
            raw::allocation_failure::<T>(rejected.error);
        }
    }

    /// Append `value` at the back, reporting growth failures.
    ///
    /// On error the queue is unchanged and `value` is returned inside the
    /// [`PushError`].
    pub fn try_push(&mut self, mut value: T) -> Result<(), PushError<T>> {
        // At most two rounds: a successful `grow` strictly adds room.
        loop {
            match self.ring.push_back(value) {
                Ok(()) => return Ok(()),
                Err(rejected) => {
                    if let Err(error) = self.grow() {
                        return Err(PushError {
                            error,
                            value: rejected,
                        });
                    }
                    value = rejected;
                }
            }
        }
    }

    pub(crate) fn ring_mut(&mut self) -> &mut RawRing<T> {
        &mut self.ring
    }

    /// Remove and return the front element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    /// Drop every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    /// Grow the buffer to exactly `new_capacity` slots.
    ///
    /// The live elements are moved into the new region in FIFO order and
    /// the old region is released. `new_capacity` must be strictly larger
    /// than the current capacity; otherwise this returns
    /// [`QueueError::InvalidCapacity`] and the queue is unchanged. An
    /// allocation failure also leaves the queue unchanged.
    pub fn reallocate(&mut self, new_capacity: usize) -> Result<(), QueueError> {
        let current = self.capacity();
        if new_capacity <= current {
            tracing::debug!(
                requested = new_capacity,
                current,
                "rejected non-growing reallocation"
            );
            return Err(QueueError::InvalidCapacity {
                requested: new_capacity,
                current,
            });
        }
        let moved = self.ring.relocate(new_capacity)?;
        tracing::trace!(from = current, to = new_capacity, moved, "reallocated queue buffer");
        Ok(())
    }

    /// Make room for at least `additional` more elements.
    ///
    /// Grows by at least the growth factor so that repeated small
    /// reservations stay amortized O(1). Does nothing if there is already
    /// room.
    pub fn reserve(&mut self, additional: usize) -> Result<(), QueueError> {
        let needed = self
            .len()
            .checked_add(additional)
            .ok_or(QueueError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = match self.capacity().checked_mul(self.growth_factor) {
            Some(grown) => needed.max(grown),
            None => needed,
        };
        self.reallocate(target)
    }

    fn grow(&mut self) -> Result<(), QueueError> {
        let target = self
            .capacity()
            .checked_mul(self.growth_factor)
            .ok_or(QueueError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        self.reallocate(target)
    }

    /// Move the contents out, leaving `self` as a freshly constructed
    /// empty queue with a single slot.
    ///
    /// Buffer, length, and capacity are transferred in O(1). The growth
    /// factor is kept by both queues.
    pub fn take(&mut self) -> Self {
        let fresh = Self {
            ring: RawRing::allocate(QueueConfig::DEFAULT_INITIAL_CAPACITY),
            growth_factor: self.growth_factor,
        };
        std::mem::replace(self, fresh)
    }

    /// Replace the contents of `self` with those of `source`, leaving
    /// `source` empty with a single slot.
    ///
    /// The previous elements of `self` are dropped and its buffer is
    /// released. `self` and `source` can never be the same queue: the
    /// two mutable borrows are rejected at compile time.
    pub fn assign_from(&mut self, source: &mut Self) {
        *self = source.take();
    }

    /// Fallible form of [`Clone::clone`].
    ///
    /// The copy has the same capacity and growth factor as `self`, and
    /// clones each element in FIFO order.
    pub fn try_clone(&self) -> Result<Self, QueueError>
    where
        T: Clone,
    {
        Ok(Self {
            ring: self.ring.try_clone()?,
            growth_factor: self.growth_factor,
        })
    }

    /// The live elements as two slices in FIFO order.
    ///
    /// The second slice is non-empty only when the elements wrap past the
    /// end of the buffer.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.ring.as_slices()
    }

    /// Mutable form of [`as_slices`](Self::as_slices).
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        self.ring.as_mut_slices()
    }

    /// Front-to-back iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.ring.as_slices();
        Iter::new(front, back)
    }

    /// Front-to-back iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.ring.as_mut_slices();
        IterMut::new(front, back)
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| raw::allocation_failure::<T>(err))
    }

    /// Replace `self` with a copy of `source`.
    ///
    /// The copy is built in a new buffer before the old contents are
    /// dropped, so a panicking `T::clone` leaves `self` as it was.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Queue<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut queue = Self::with_capacity(iter.size_hint().0);
        queue.extend(iter);
        queue
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Queue<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
