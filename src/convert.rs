//! Zero-copy conversions between `ndarray` 2-D arrays and rectangular views.
//!
//! Only arrays in standard (C, row-major) layout convert; anything else is
//! rejected with [`StridedError::NotRowMajor`] rather than copied.

use ndarray::{ArrayView2, ArrayViewMut2};

use crate::{Array2, Rect2View, Rect2ViewMut, Result, StridedError};

/// Wrap an ndarray `Array2<T>` as a [`Rect2View`] (zero-copy).
pub fn array_to_rect_view<T>(arr: &ndarray::Array2<T>) -> Result<Rect2View<'_, T>> {
    let (height, width) = arr.dim();
    let data = arr.as_slice().ok_or(StridedError::NotRowMajor)?;
    Rect2View::new(data, height, width)
}

/// Wrap an ndarray `ArrayView2<T>` as a [`Rect2View`] (zero-copy).
pub fn view_to_rect_view<'a, T>(view: &ArrayView2<'a, T>) -> Result<Rect2View<'a, T>> {
    let (height, width) = view.dim();
    let data = view.to_slice().ok_or(StridedError::NotRowMajor)?;
    Rect2View::new(data, height, width)
}

/// Wrap an ndarray `ArrayViewMut2<T>` as a [`Rect2ViewMut`] (zero-copy).
pub fn view_mut_to_rect_view_mut<T>(view: ArrayViewMut2<'_, T>) -> Result<Rect2ViewMut<'_, T>> {
    let (height, width) = view.dim();
    let data = view.into_slice().ok_or(StridedError::NotRowMajor)?;
    Rect2ViewMut::new(data, height, width)
}

/// Convert an owned [`Array2`] into an ndarray `Array2<T>` without copying.
pub fn rect_array_to_ndarray<T>(arr: Array2<T>) -> ndarray::Array2<T> {
    let (height, width) = (arr.height(), arr.width());
    let data = arr.into_vec();
    match ndarray::Array2::from_shape_vec((height, width), data) {
        Ok(out) => out,
        // `Array2` keeps `data.len() == height * width`.
        Err(err) => unreachable!("Array2 invariant violated: {err}"),
    }
}
