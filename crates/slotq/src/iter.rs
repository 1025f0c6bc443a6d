//! Iterators over a [`Queue`].
//!
//! The borrowing iterators walk the two runs returned by
//! [`Queue::as_slices`] back to back, so they never touch the ring
//! arithmetic themselves.

use std::iter::FusedIterator;
use std::slice;

use crate::queue::Queue;

/// Front-to-back iterator over `&T`, created by [`Queue::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
}

// Not derived: cloning the iterator must not require `T: Clone`.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(front: &'a [T], back: &'a [T]) -> Self {
        Self {
            front: front.iter(),
            back: back.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self.front.next() {
            Some(value) => Some(value),
            None => self.back.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.back.next_back() {
            Some(value) => Some(value),
            None => self.front.next_back(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Front-to-back iterator over `&mut T`, created by [`Queue::iter_mut`].
#[derive(Debug)]
pub struct IterMut<'a, T> {
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(front: &'a mut [T], back: &'a mut [T]) -> Self {
        Self {
            front: front.iter_mut(),
            back: back.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        match self.front.next() {
            Some(value) => Some(value),
            None => self.back.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.back.next_back() {
            Some(value) => Some(value),
            None => self.front.next_back(),
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that pops elements in FIFO order, created by
/// `Queue::into_iter`.
///
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T> {
    queue: Queue<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(queue: Queue<T>) -> Self {
        Self { queue }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.queue.ring_mut().pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.queue).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Queue;

    /// A queue whose live elements wrap: physical layout `[4, 5, 2, 3]`.
    fn wrapped() -> Queue<i32> {
        let mut q = Queue::with_capacity(4);
        q.extend([0, 1, 2, 3]);
        q.pop();
        q.pop();
        q.extend([4, 5]);
        q
    }

    #[test]
    fn iter_crosses_the_wrap_point() {
        let q = wrapped();
        let (front, back) = q.as_slices();
        assert_eq!((front, back), (&[2, 3][..], &[4, 5][..]));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(q.iter().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2]);
    }

    #[test]
    fn iter_is_exact_size() {
        let q = wrapped();
        let mut it = q.iter();
        assert_eq!(it.len(), 4);
        it.next();
        it.next_back();
        assert_eq!(it.len(), 2);
        assert_eq!(it.size_hint(), (2, Some(2)));
    }

    #[test]
    fn iter_mut_edits_both_runs() {
        let mut q = wrapped();
        for value in &mut q {
            *value *= 10;
        }
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![20, 30, 40, 50]);
    }

    #[test]
    fn into_iter_yields_fifo_order() {
        let q = wrapped();
        let mut it = q.into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn into_iter_drains_from_both_ends() {
        let mut it = wrapped().into_iter();
        assert_eq!(it.next_back(), Some(5));
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.len(), 2);
        assert_eq!(it.rev().collect::<Vec<_>>(), vec![4, 3]);
    }

    #[test]
    fn empty_queue_iterates_nothing() {
        let q: Queue<i32> = Queue::new();
        assert_eq!(q.iter().next(), None);
        assert_eq!((&q).into_iter().len(), 0);
    }
}
