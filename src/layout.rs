//! Row-major offset arithmetic and unchecked element access.
//!
//! Every raw layout assumption the crate makes lives in this module: a
//! [`RectBuffer`] stores `height * width` elements back-to-back, row after row,
//! so element `(i, j)` sits at linear position `i * width + j` from the base
//! pointer.

use std::slice;

use crate::{Result, StridedError};

/// Provider contract for a rectangular, row-major, contiguous buffer.
///
/// The buffer reports its own shape and its own stored length. The stored
/// length is authoritative and is cross-checked against `height * width` by
/// the flattening accessors; the element accessors trust `width` alone.
///
/// # Safety
///
/// Implementors must guarantee that, for as long as `&self` is borrowed:
/// - `as_ptr()` is non-null, suitably aligned, and points to `stored_len()`
///   initialized elements of `Elem` laid out contiguously;
/// - element `(i, j)` of the logical `height x width` array lives at
///   `as_ptr().add(i * width() + j)`;
/// - nothing writes through another pointer to that storage.
pub unsafe trait RectBuffer {
    type Elem;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Number of columns; also the distance in elements between rows.
    fn width(&self) -> usize;

    /// Number of elements the backing store actually holds.
    fn stored_len(&self) -> usize;

    /// Base pointer of the backing store.
    fn as_ptr(&self) -> *const Self::Elem;
}

/// Mutable extension of [`RectBuffer`].
///
/// # Safety
///
/// In addition to the [`RectBuffer`] contract, `as_mut_ptr()` must return the
/// same address as `as_ptr()`, and the storage must be uniquely borrowed for
/// as long as `&mut self` is.
pub unsafe trait RectBufferMut: RectBuffer {
    fn as_mut_ptr(&mut self) -> *mut Self::Elem;
}

/// Linear offset of `(i, j)` in a row-major buffer of the given width.
///
/// Plain arithmetic; overflow is the caller's problem.
#[inline(always)]
pub fn row_major_offset(width: usize, i: usize, j: usize) -> usize {
    i * width + j
}

/// Pointer to the first element of the backing store.
///
/// For an empty buffer this is where the first element would be; it is never
/// valid to dereference in that case.
#[inline]
pub fn first_ptr<B: RectBuffer + ?Sized>(buf: &B) -> *const B::Elem {
    buf.as_ptr()
}

/// Reference to the first element of the backing store.
///
/// # Safety
/// The buffer must be non-empty.
#[inline]
pub unsafe fn first_unchecked<B: RectBuffer + ?Sized>(buf: &B) -> &B::Elem {
    &*buf.as_ptr()
}

/// Pointer to element `(i, j)`, computed as `base + i * width + j`.
///
/// Indices are zero-based. The width comes from the buffer, not the caller.
///
/// # Safety
/// The computed offset must not exceed `buf.stored_len()`.
#[inline]
pub unsafe fn ptr_at<B: RectBuffer + ?Sized>(buf: &B, i: usize, j: usize) -> *const B::Elem {
    buf.as_ptr().add(row_major_offset(buf.width(), i, j))
}

/// Reference to element `(i, j)` without bounds checking.
///
/// Out-of-range `j` is not rejected: `(0, width)` aliases `(1, 0)`.
///
/// # Safety
/// `i * width + j` must be strictly less than `buf.stored_len()`.
#[inline]
pub unsafe fn get_unchecked<B: RectBuffer + ?Sized>(buf: &B, i: usize, j: usize) -> &B::Elem {
    &*ptr_at(buf, i, j)
}

/// Mutable reference to element `(i, j)` without bounds checking.
///
/// # Safety
/// `i * width + j` must be strictly less than `buf.stored_len()`.
#[inline]
pub unsafe fn get_unchecked_mut<B: RectBufferMut + ?Sized>(
    buf: &mut B,
    i: usize,
    j: usize,
) -> &mut B::Elem {
    let offset = row_major_offset(buf.width(), i, j);
    &mut *buf.as_mut_ptr().add(offset)
}

/// Cross-check the stored length against the shape.
fn checked_len<B: RectBuffer + ?Sized>(buf: &B) -> Result<usize> {
    let (height, width) = (buf.height(), buf.width());
    let stored = buf.stored_len();
    let computed = match height.checked_mul(width) {
        Some(n) => n,
        None => {
            log::error!(
                "rectangular buffer {}x{} overflows usize (stored length {})",
                height,
                width,
                stored
            );
            return Err(StridedError::OffsetOverflow);
        }
    };
    if computed != stored {
        log::error!(
            "rectangular buffer {}x{} computes {} elements but stores {}",
            height,
            width,
            computed,
            stored
        );
        return Err(StridedError::LengthMismatch { computed, stored });
    }
    log::trace!("flattening {}x{} buffer ({} elements)", height, width, stored);
    Ok(stored)
}

/// Whole backing store as one slice, or an error if the stored length
/// disagrees with `height * width`.
pub fn try_as_flat<B: RectBuffer + ?Sized>(buf: &B) -> Result<&[B::Elem]> {
    let len = checked_len(buf)?;
    // SAFETY: RectBuffer guarantees `stored_len` initialized elements at `as_ptr`.
    Ok(unsafe { slice::from_raw_parts(buf.as_ptr(), len) })
}

/// Mutable counterpart of [`try_as_flat`].
pub fn try_as_flat_mut<B: RectBufferMut + ?Sized>(buf: &mut B) -> Result<&mut [B::Elem]> {
    let len = checked_len(buf)?;
    // SAFETY: RectBufferMut guarantees unique access to `stored_len` elements.
    Ok(unsafe { slice::from_raw_parts_mut(buf.as_mut_ptr(), len) })
}

/// Whole backing store as one slice of length `height * width`.
///
/// # Panics
/// Panics if the buffer's stored length disagrees with `height * width`.
/// That indicates a broken [`RectBuffer`] implementation and is not
/// recoverable.
pub fn as_flat<B: RectBuffer + ?Sized>(buf: &B) -> &[B::Elem] {
    match try_as_flat(buf) {
        Ok(flat) => flat,
        Err(err) => panic!("corrupted rectangular buffer: {err}"),
    }
}

/// Mutable counterpart of [`as_flat`].
///
/// # Panics
/// Panics if the buffer's stored length disagrees with `height * width`.
pub fn as_flat_mut<B: RectBufferMut + ?Sized>(buf: &mut B) -> &mut [B::Elem] {
    match try_as_flat_mut(buf) {
        Ok(flat) => flat,
        Err(err) => panic!("corrupted rectangular buffer: {err}"),
    }
}
