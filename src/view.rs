//! Concrete rectangular buffer providers.
//!
//! - [`Rect2View`]: Immutable borrowed 2D view over a row-major slice
//! - [`Rect2ViewMut`]: Mutable borrowed 2D view over a row-major slice
//! - [`Array2`]: Owned 2D row-major array

use std::ops::{Index, IndexMut};

use num_traits::Zero;

use crate::enumerate::Enumerable;
use crate::layout::{row_major_offset, RectBuffer, RectBufferMut};
use crate::{Result, StridedError};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that a backing store of `len` elements holds exactly `height x width`.
fn validate_shape(len: usize, height: usize, width: usize) -> Result<()> {
    let expected = height
        .checked_mul(width)
        .ok_or(StridedError::OffsetOverflow)?;
    if expected != len {
        return Err(StridedError::ShapeMismatch { height, width, len });
    }
    Ok(())
}

#[inline]
fn checked_offset(height: usize, width: usize, i: usize, j: usize) -> Option<usize> {
    (i < height && j < width).then(|| row_major_offset(width, i, j))
}

// ============================================================================
// Rect2View
// ============================================================================

/// Immutable 2D row-major view over a borrowed slice.
pub struct Rect2View<'a, T> {
    data: &'a [T],
    height: usize,
    width: usize,
}

impl<T> Clone for Rect2View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Rect2View<'_, T> {}

impl<T> std::fmt::Debug for Rect2View<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect2View")
            .field("height", &self.height)
            .field("width", &self.width)
            .finish()
    }
}

impl<'a, T> Rect2View<'a, T> {
    /// Create a view, checking that `data.len() == height * width`.
    pub fn new(data: &'a [T], height: usize, width: usize) -> Result<Self> {
        validate_shape(data.len(), height, width)?;
        Ok(Self {
            data,
            height,
            width,
        })
    }

    /// Create a view without checking the shape.
    ///
    /// The stored length still comes from `data.len()`, so a wrong shape is
    /// caught by the flattening accessors rather than read out of bounds there.
    ///
    /// # Safety
    /// `height * width` must equal `data.len()`; the unchecked element
    /// accessors trust `width` alone.
    pub unsafe fn new_unchecked(data: &'a [T], height: usize, width: usize) -> Self {
        Self {
            data,
            height,
            width,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `[height, width]`.
    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    /// Element strides, `[width, 1]`.
    #[inline]
    pub fn strides(&self) -> [usize; 2] {
        [self.width, 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Get an element, or `None` if `(i, j)` is outside the view.
    pub fn get(&self, i: usize, j: usize) -> Option<&'a T> {
        let data = self.data;
        checked_offset(self.height, self.width, i, j).map(move |k| &data[k])
    }

    /// Reference to the first element without checking emptiness.
    ///
    /// # Safety
    /// The view must be non-empty.
    #[inline]
    pub unsafe fn first_unchecked(&self) -> &'a T {
        &*self.data.as_ptr()
    }

    /// Get an element without bounds checking.
    ///
    /// # Safety
    /// `i * width + j` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> &'a T {
        &*self
            .data
            .as_ptr()
            .add(row_major_offset(self.width, i, j))
    }

    /// Enumerate the flat backing store as `(index, &value)` pairs.
    pub fn enumerate(&self) -> Enumerable<'a, T> {
        Enumerable::new(self.data)
    }
}

unsafe impl<T> RectBuffer for Rect2View<'_, T> {
    type Elem = T;

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }
}

// ============================================================================
// Rect2ViewMut
// ============================================================================

/// Mutable 2D row-major view over a borrowed slice.
pub struct Rect2ViewMut<'a, T> {
    data: &'a mut [T],
    height: usize,
    width: usize,
}

impl<T> std::fmt::Debug for Rect2ViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect2ViewMut")
            .field("height", &self.height)
            .field("width", &self.width)
            .finish()
    }
}

impl<'a, T> Rect2ViewMut<'a, T> {
    /// Create a mutable view, checking that `data.len() == height * width`.
    pub fn new(data: &'a mut [T], height: usize, width: usize) -> Result<Self> {
        validate_shape(data.len(), height, width)?;
        Ok(Self {
            data,
            height,
            width,
        })
    }

    /// Create without checking the shape.
    ///
    /// # Safety
    /// `height * width` must equal `data.len()`.
    pub unsafe fn new_unchecked(data: &'a mut [T], height: usize, width: usize) -> Self {
        Self {
            data,
            height,
            width,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    #[inline]
    pub fn strides(&self) -> [usize; 2] {
        [self.width, 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> Rect2View<'_, T> {
        Rect2View {
            data: &*self.data,
            height: self.height,
            width: self.width,
        }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        checked_offset(self.height, self.width, i, j).map(|k| &self.data[k])
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        checked_offset(self.height, self.width, i, j).map(move |k| &mut self.data[k])
    }

    /// Set an element.
    ///
    /// # Panics
    /// Panics if `(i, j)` is outside the view.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let (height, width) = (self.height, self.width);
        match self.get_mut(i, j) {
            Some(slot) => *slot = value,
            None => panic!("index ({i}, {j}) out of bounds for {height}x{width} view"),
        }
    }

    /// Get an element without bounds checking.
    ///
    /// # Safety
    /// `i * width + j` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> &T {
        &*self
            .data
            .as_ptr()
            .add(row_major_offset(self.width, i, j))
    }

    /// Get a mutable element without bounds checking.
    ///
    /// # Safety
    /// `i * width + j` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize, j: usize) -> &mut T {
        let offset = row_major_offset(self.width, i, j);
        &mut *self.data.as_mut_ptr().add(offset)
    }

    /// Consume the view, returning the backing slice with the view's lifetime.
    pub fn into_slice(self) -> &'a mut [T] {
        self.data
    }
}

unsafe impl<T> RectBuffer for Rect2ViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }
}

unsafe impl<T> RectBufferMut for Rect2ViewMut<'_, T> {
    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }
}

// ============================================================================
// Array2
// ============================================================================

/// Owned 2D row-major array.
///
/// Allocated once on construction; never resized.
pub struct Array2<T> {
    data: Vec<T>,
    height: usize,
    width: usize,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Array2<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array2")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Clone> Clone for Array2<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            height: self.height,
            width: self.width,
        }
    }
}

impl<T: PartialEq> PartialEq for Array2<T> {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height && self.width == other.width && self.data == other.data
    }
}

impl<T: Clone + Zero> Array2<T> {
    /// Create a `height x width` array filled with zeros.
    pub fn zeros(height: usize, width: usize) -> Result<Self> {
        let total = height
            .checked_mul(width)
            .ok_or(StridedError::OffsetOverflow)?;
        Ok(Self {
            data: vec![T::zero(); total],
            height,
            width,
        })
    }
}

impl<T> Array2<T> {
    /// Take ownership of a row-major buffer.
    pub fn from_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self> {
        validate_shape(data.len(), height, width)?;
        Ok(Self {
            data,
            height,
            width,
        })
    }

    /// Create an array with values produced by `f(i, j)`, called in row-major order.
    pub fn from_fn(
        height: usize,
        width: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self> {
        let total = height
            .checked_mul(width)
            .ok_or(StridedError::OffsetOverflow)?;
        let mut data = Vec::with_capacity(total);
        for i in 0..height {
            for j in 0..width {
                data.push(f(i, j));
            }
        }
        Ok(Self {
            data,
            height,
            width,
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    #[inline]
    pub fn strides(&self) -> [usize; 2] {
        [self.width, 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Create an immutable view over this array.
    pub fn view(&self) -> Rect2View<'_, T> {
        Rect2View {
            data: &self.data,
            height: self.height,
            width: self.width,
        }
    }

    /// Create a mutable view over this array.
    pub fn view_mut(&mut self) -> Rect2ViewMut<'_, T> {
        Rect2ViewMut {
            data: &mut self.data,
            height: self.height,
            width: self.width,
        }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        checked_offset(self.height, self.width, i, j).map(|k| &self.data[k])
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        checked_offset(self.height, self.width, i, j).map(move |k| &mut self.data[k])
    }

    /// Iterate over all elements in memory order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Enumerate the flat backing store as `(index, &value)` pairs.
    pub fn enumerate(&self) -> Enumerable<'_, T> {
        Enumerable::new(&self.data)
    }

    /// Release the row-major backing store.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

unsafe impl<T> RectBuffer for Array2<T> {
    type Elem = T;

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }
}

unsafe impl<T> RectBufferMut for Array2<T> {
    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.height && j < self.width,
            "index ({}, {}) out of bounds for {}x{} array",
            i,
            j,
            self.height,
            self.width
        );
        &self.data[row_major_offset(self.width, i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.height && j < self.width,
            "index ({}, {}) out of bounds for {}x{} array",
            i,
            j,
            self.height,
            self.width
        );
        &mut self.data[row_major_offset(self.width, i, j)]
    }
}

// ============================================================================
// Tests
// ============================================================================
