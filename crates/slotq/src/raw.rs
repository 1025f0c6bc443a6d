//! Uninitialized slot storage backing [`Queue`](crate::Queue).
//!
//! This is the only module in the crate that contains `unsafe` code.
//! Allocation of the region (`Slots`) is kept apart from the lifetime of
//! the values inside it (`RawRing`):
//!
//! - `Slots` allocates and releases `cap` element-sized, element-aligned
//!   slots. It never reads, writes, or drops a `T`.
//! - `RawRing` tracks which slots are live (`head` and `len`) and is the
//!   only place values are written into, read out of, or dropped in place.
//!
//! Every `unsafe` block carries a `// SAFETY:` comment naming the ring
//! invariant it relies on:
//!
//! 1. `head < cap` and `len <= cap`.
//! 2. Logical slots `0..len` (physical `(head + i) % cap`) are initialized.
//! 3. Every other physical slot is uninitialized.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use crate::error::QueueError;

/// An owned region of `cap` uninitialized `T` slots.
struct Slots<T> {
    ptr: NonNull<T>,
    cap: usize,
    marker: PhantomData<T>,
}

// SAFETY: `Slots` uniquely owns its region, the same as `Box<[T]>`.
unsafe impl<T: Send> Send for Slots<T> {}
// SAFETY: shared access to the owning ring only ever yields `&T`.
unsafe impl<T: Sync> Sync for Slots<T> {}

impl<T> Slots<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    fn layout(cap: usize) -> Result<Layout, QueueError> {
        Layout::array::<T>(cap).map_err(|_| QueueError::CapacityOverflow { requested: cap })
    }

    fn allocate(cap: usize) -> Result<Self, QueueError> {
        debug_assert!(cap > 0, "slot regions are never empty");
        if Self::IS_ZST {
            // Zero-sized values need no backing memory.
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                marker: PhantomData,
            });
        }
        let layout = Self::layout(cap)?;
        // SAFETY: `T` is not zero-sized and `cap > 0`, so `layout` is non-empty.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(QueueError::AllocationFailed {
            bytes: layout.size(),
        })?;
        Ok(Self {
            ptr,
            cap,
            marker: PhantomData,
        })
    }

    /// Pointer to physical slot `idx`.
    fn slot(&self, idx: usize) -> *mut T {
        debug_assert!(idx < self.cap);
        // SAFETY: `idx < cap`, so the offset stays inside the allocation
        // (and is zero bytes for zero-sized `T`).
        unsafe { self.ptr.as_ptr().add(idx) }
    }
}

impl<T> Drop for Slots<T> {
    fn drop(&mut self) {
        if Self::IS_ZST {
            return;
        }
        // Validated when the region was allocated, so this never fails.
        if let Ok(layout) = Self::layout(self.cap) {
            // SAFETY: `ptr` came from `alloc::alloc` with this exact layout.
            // The owning ring has already dropped or moved out every live slot.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
        }
    }
}

/// Ring-indexed view over a [`Slots`] region that owns the live elements.
pub(crate) struct RawRing<T> {
    slots: Slots<T>,
    /// Physical index of the front element.
    head: usize,
    /// Number of live elements.
    len: usize,
}

impl<T> RawRing<T> {
    /// Allocate an empty ring with `cap` slots.
    pub(crate) fn try_allocate(cap: usize) -> Result<Self, QueueError> {
        Ok(Self {
            slots: Slots::allocate(cap)?,
            head: 0,
            len: 0,
        })
    }

    /// Infallible form of [`try_allocate`](Self::try_allocate).
    pub(crate) fn allocate(cap: usize) -> Self {
        Self::try_allocate(cap).unwrap_or_else(|err| allocation_failure::<T>(err))
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.cap
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.cap
    }

    /// Map a logical index (0 = front) to its physical slot.
    fn physical(&self, logical: usize) -> usize {
        debug_assert!(logical < self.slots.cap);
        let until_wrap = self.slots.cap - self.head;
        if logical < until_wrap {
            self.head + logical
        } else {
            logical - until_wrap
        }
    }

    /// Physical start and length of the run before the wrap point, and the
    /// length of the run that continues from slot 0.
    fn runs(&self) -> (usize, usize, usize) {
        let until_wrap = self.slots.cap - self.head;
        if self.len <= until_wrap {
            (self.head, self.len, 0)
        } else {
            (self.head, until_wrap, self.len - until_wrap)
        }
    }

    /// Write `value` behind the back element, or hand it back if full.
    pub(crate) fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        let idx = self.physical(self.len);
        // SAFETY: `len < cap`, so logical slot `len` maps to a vacant
        // physical slot (invariant 3).
        unsafe { self.slots.slot(idx).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Move the front element out of its slot.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let idx = self.head;
        // SAFETY: `len > 0`, so `head` indexes the live front element
        // (invariant 2). The slot is retired by advancing `head` below
        // before anything else can observe it.
        let value = unsafe { self.slots.slot(idx).read() };
        self.len -= 1;
        self.head = if self.len == 0 || idx + 1 == self.slots.cap {
            0
        } else {
            idx + 1
        };
        Some(value)
    }

    /// Move the back element out of its slot.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;
        let idx = self.physical(last);
        // SAFETY: `last < len`, so the slot is live (invariant 2). Shrinking
        // `len` below retires it.
        let value = unsafe { self.slots.slot(idx).read() };
        self.len = last;
        if self.len == 0 {
            self.head = 0;
        }
        Some(value)
    }

    pub(crate) fn get(&self, logical: usize) -> Option<&T> {
        if logical >= self.len {
            return None;
        }
        // SAFETY: `logical < len`, so the slot is live (invariant 2).
        Some(unsafe { &*self.slots.slot(self.physical(logical)) })
    }

    pub(crate) fn get_mut(&mut self, logical: usize) -> Option<&mut T> {
        if logical >= self.len {
            return None;
        }
        // SAFETY: as in `get`; `&mut self` guarantees exclusivity.
        Some(unsafe { &mut *self.slots.slot(self.physical(logical)) })
    }

    /// The live elements as two runs in FIFO order.
    pub(crate) fn as_slices(&self) -> (&[T], &[T]) {
        let (start, front, back) = self.runs();
        // SAFETY: the two runs are disjoint and together cover exactly the
        // live elements (invariants 1 and 2).
        unsafe {
            (
                slice::from_raw_parts(self.slots.slot(start), front),
                slice::from_raw_parts(self.slots.slot(0), back),
            )
        }
    }

    pub(crate) fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (start, front, back) = self.runs();
        // SAFETY: as in `as_slices`; the runs never overlap, so handing out
        // two mutable slices does not alias.
        unsafe {
            (
                slice::from_raw_parts_mut(self.slots.slot(start), front),
                slice::from_raw_parts_mut(self.slots.slot(0), back),
            )
        }
    }

    /// Drop every live element in place. The region is kept.
    pub(crate) fn clear(&mut self) {
        let (start, front, back) = self.runs();
        let front = ptr::slice_from_raw_parts_mut(self.slots.slot(start), front);
        let back = ptr::slice_from_raw_parts_mut(self.slots.slot(0), back);
        // Retire the slots first: a panicking `Drop` must not lead to a
        // second drop of the same element later.
        self.head = 0;
        self.len = 0;
        let _back = DropRun(back);
        // SAFETY: `front` is a run of live elements no longer tracked by
        // `len`, disjoint from `back`.
        unsafe { ptr::drop_in_place(front) };
    }

    /// Move the live elements into a fresh region of `new_cap` slots,
    /// front element first, and release the old region.
    ///
    /// On error the ring is untouched. Returns the number of elements moved.
    pub(crate) fn relocate(&mut self, new_cap: usize) -> Result<usize, QueueError> {
        debug_assert!(new_cap >= self.len);
        let fresh = Slots::allocate(new_cap)?;
        let (start, front, back) = self.runs();
        // SAFETY: the source runs hold the live elements (invariant 2) and
        // `fresh` is a separate allocation with `new_cap >= front + back`
        // slots. Values are moved bitwise; the old region is released
        // below without dropping them.
        unsafe {
            ptr::copy_nonoverlapping(self.slots.slot(start), fresh.slot(0), front);
            if back > 0 {
                ptr::copy_nonoverlapping(self.slots.slot(0), fresh.slot(front), back);
            }
        }
        drop(mem::replace(&mut self.slots, fresh));
        self.head = 0;
        Ok(self.len)
    }

    /// Clone the live elements into a new ring of the same capacity,
    /// front element at slot 0.
    pub(crate) fn try_clone(&self) -> Result<Self, QueueError>
    where
        T: Clone,
    {
        let mut copy = Self::try_allocate(self.capacity())?;
        let (front, back) = self.as_slices();
        for value in front.iter().chain(back) {
            let cloned = value.clone();
            // SAFETY: `copy` has the same capacity as `self` and receives
            // at most `self.len` elements, so slot `copy.len` is in bounds
            // and vacant. `len` grows only after the write: if `clone`
            // panics, dropping `copy` drops exactly what was written.
            unsafe { copy.slots.slot(copy.len).write(cloned) };
            copy.len += 1;
        }
        Ok(copy)
    }
}

impl<T> Drop for RawRing<T> {
    fn drop(&mut self) {
        // `slots` releases the region after this returns.
        self.clear();
    }
}

/// Drops a run of elements on scope exit, including during unwinding.
struct DropRun<T>(*mut [T]);

impl<T> Drop for DropRun<T> {
    fn drop(&mut self) {
        // SAFETY: only built in `RawRing::clear` over live elements that
        // the ring has already stopped tracking.
        unsafe { ptr::drop_in_place(self.0) }
    }
}

/// Report a failed allocation the way `Vec` does: abort through the
/// global handler for allocator failures, panic for overflows.
#[cold]
pub(crate) fn allocation_failure<T>(err: QueueError) -> ! {
    if let QueueError::AllocationFailed { bytes } = &err {
        if let Ok(layout) = Layout::from_size_align(*bytes, mem::align_of::<T>()) {
            alloc::handle_alloc_error(layout);
        }
    }
    panic!("{err}");
}
