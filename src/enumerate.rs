//! Allocation-free `(index, value)` enumeration over a contiguous slice.
//!
//! [`Enumerable`] is a stateless handle; each [`Enumerable::begin`] hands out a
//! fresh [`Cursor`] positioned before index 0. A cursor walks forward through
//! `advance`/`current` and can also be driven as an [`Iterator`].
//!
//! ```text
//! NotStarted --advance--> InProgress(0) --advance--> InProgress(1) ... --advance--> Exhausted
//!      \______________________ (empty view) _______________________________________/
//! ```

use std::iter::FusedIterator;

/// Position value meaning "one before index 0".
const BEFORE_START: usize = usize::MAX;

/// Restartable enumeration source over a contiguous read-only view.
pub struct Enumerable<'a, T> {
    data: &'a [T],
}

impl<T> Clone for Enumerable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Enumerable<'_, T> {}

impl<T> std::fmt::Debug for Enumerable<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerable")
            .field("len", &self.data.len())
            .finish()
    }
}

/// Wrap a contiguous view for `(index, value)` enumeration.
#[inline]
pub fn make_enumeration<T>(data: &[T]) -> Enumerable<'_, T> {
    Enumerable::new(data)
}

impl<'a, T> Enumerable<'a, T> {
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// Build from a base pointer and a length.
    ///
    /// # Safety
    /// Same contract as [`std::slice::from_raw_parts`]: `ptr` must be valid for
    /// reads of `len` initialized elements for `'a`, and nothing may mutate
    /// them while the enumerable or any of its cursors is alive.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            data: std::slice::from_raw_parts(ptr, len),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Start a new pass, positioned before the first element.
    #[inline]
    pub fn begin(&self) -> Cursor<'a, T> {
        Cursor {
            data: self.data,
            position: BEFORE_START,
            exhausted: false,
        }
    }
}

impl<'a, T> IntoIterator for Enumerable<'a, T> {
    type Item = (usize, &'a T);
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

impl<'a, T> IntoIterator for &Enumerable<'a, T> {
    type Item = (usize, &'a T);
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

/// Where a [`Cursor`] is in its pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    NotStarted,
    InProgress(usize),
    Exhausted,
}

/// Single forward pass over an [`Enumerable`].
///
/// Lives entirely on the stack: a slice reference, a position, and a flag.
pub struct Cursor<'a, T> {
    data: &'a [T],
    position: usize,
    exhausted: bool,
}

impl<T> std::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("len", &self.data.len())
            .field("state", &self.state())
            .finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    /// Move to the next position.
    ///
    /// Returns `true` iff `position + 1 < len`. On `false` the cursor keeps its
    /// last valid position and becomes exhausted for good.
    #[inline]
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let next = self.position.wrapping_add(1);
        if next < self.data.len() {
            self.position = next;
            true
        } else {
            self.exhausted = true;
            false
        }
    }

    pub fn state(&self) -> CursorState {
        if self.exhausted {
            CursorState::Exhausted
        } else if self.position == BEFORE_START {
            CursorState::NotStarted
        } else {
            CursorState::InProgress(self.position)
        }
    }

    /// Current index, if the last `advance` succeeded.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self.state() {
            CursorState::InProgress(k) => Some(k),
            _ => None,
        }
    }

    /// Current `(index, value)` pair.
    ///
    /// # Panics
    /// Panics unless the most recent `advance` returned `true`.
    pub fn current(&self) -> (usize, &'a T) {
        match self.state() {
            CursorState::InProgress(k) => (k, &self.data[k]),
            state => panic!("Cursor::current called in state {state:?}"),
        }
    }

    /// Current `(index, value)` pair without checking the cursor state.
    ///
    /// # Safety
    /// The most recent `advance` must have returned `true`.
    #[inline]
    pub unsafe fn current_unchecked(&self) -> (usize, &'a T) {
        (self.position, &*self.data.as_ptr().add(self.position))
    }

    #[inline]
    fn remaining(&self) -> usize {
        if self.exhausted {
            0
        } else {
            // Wraps to `len` before the first advance.
            self.data.len() - self.position.wrapping_add(1)
        }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            // SAFETY: `advance` just returned true.
            Some(unsafe { self.current_unchecked() })
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_three() {
        let data = [10, 20, 30];
        let mut cursor = make_enumeration(&data).begin();
        assert_eq!(cursor.state(), CursorState::NotStarted);

        let mut seen = Vec::new();
        while cursor.advance() {
            let (k, v) = cursor.current();
            seen.push((k, *v));
        }
        assert_eq!(seen, vec![(0, 10), (1, 20), (2, 30)]);
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(!cursor.advance());
    }

    #[test]
    fn test_empty_view() {
        let data: [u8; 0] = [];
        let mut cursor = make_enumeration(&data).begin();
        assert!(!cursor.advance());
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn test_single_element() {
        let data = ["only"];
        let mut cursor = make_enumeration(&data).begin();
        assert!(cursor.advance());
        assert_eq!(cursor.current(), (0, &"only"));
        assert!(!cursor.advance());
    }

    #[test]
    fn test_state_transitions() {
        let data = [1.5, 2.5];
        let mut cursor = make_enumeration(&data).begin();
        assert_eq!(cursor.state(), CursorState::NotStarted);
        cursor.advance();
        assert_eq!(cursor.state(), CursorState::InProgress(0));
        cursor.advance();
        assert_eq!(cursor.state(), CursorState::InProgress(1));
        cursor.advance();
        assert_eq!(cursor.state(), CursorState::Exhausted);
        cursor.advance();
        assert_eq!(cursor.state(), CursorState::Exhausted);
    }

    #[test]
    #[should_panic(expected = "NotStarted")]
    fn test_current_before_advance_panics() {
        let data = [1];
        let cursor = make_enumeration(&data).begin();
        let _ = cursor.current();
    }

    #[test]
    #[should_panic(expected = "Exhausted")]
    fn test_current_after_exhaustion_panics() {
        let data = [1];
        let mut cursor = make_enumeration(&data).begin();
        while cursor.advance() {}
        let _ = cursor.current();
    }

    #[test]
    fn test_restartable() {
        let data: Vec<i32> = (0..17).map(|x| x * x).collect();
        let e = make_enumeration(&data);
        let first: Vec<_> = e.begin().collect();
        let second: Vec<_> = e.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 17);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let data = [0u8; 4];
        let mut cursor = make_enumeration(&data).begin();
        assert_eq!(cursor.len(), 4);
        cursor.next();
        assert_eq!(cursor.len(), 3);
        cursor.by_ref().for_each(drop);
        assert_eq!(cursor.len(), 0);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_from_raw_parts() {
        let data = vec![3u64, 1, 4, 1, 5];
        let e = unsafe { Enumerable::from_raw_parts(data.as_ptr(), 3) };
        let pairs: Vec<_> = (&e).into_iter().map(|(k, &v)| (k, v)).collect();
        assert_eq!(pairs, vec![(0, 3), (1, 1), (2, 4)]);
    }

    #[test]
    fn test_zero_sized_elements() {
        let data = [(); 5];
        assert_eq!(make_enumeration(&data).begin().count(), 5);
    }
}
