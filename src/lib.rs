//! Unchecked row-major element access and allocation-free indexed enumeration.
//!
//! This crate provides two leaf-level primitives for numeric code working on
//! fixed-shape contiguous buffers:
//!
//! - **Rectangular access**: given a 2D row-major buffer that reports its own
//!   height, width and stored length ([`RectBuffer`]), compute the linear offset
//!   `i * width + j` and hand out a direct reference without bounds validation.
//! - **Indexed enumeration**: walk a contiguous read-only run of elements as
//!   `(index, &value)` pairs through an explicit [`Cursor`], with no allocation.
//!
//! # Core Types
//!
//! - [`RectBuffer`] / [`RectBufferMut`]: Provider contract for row-major buffers
//! - [`Rect2View`] / [`Rect2ViewMut`]: Borrowed 2D views over existing data
//! - [`Array2`]: Owned 2D row-major array
//! - [`Enumerable`] / [`Cursor`]: Restartable `(index, value)` enumeration
//!
//! # Unchecked Access
//!
//! - [`first_ptr`], [`first_unchecked`]: First element of the backing store
//! - [`ptr_at`], [`get_unchecked`], [`get_unchecked_mut`]: Element `(i, j)`
//! - [`as_flat`], [`as_flat_mut`]: Whole backing store as one slice, with a
//!   length cross-check against `height * width`
//!
//! # Example
//!
//! ```rust
//! use strided_unchecked::{get_unchecked, make_enumeration, Rect2View};
//!
//! let data = [1, 2, 3, 4, 5, 6];
//! let view = Rect2View::new(&data, 2, 3).unwrap();
//!
//! // SAFETY: (1, 2) is inside the 2x3 buffer.
//! assert_eq!(unsafe { *get_unchecked(&view, 1, 2) }, 6);
//!
//! let mut cursor = make_enumeration(&data[..3]).begin();
//! while cursor.advance() {
//!     let (index, value) = cursor.current();
//!     assert_eq!(*value, data[index]);
//! }
//! ```

mod enumerate;
mod layout;
mod pod;
mod view;

#[cfg(feature = "ndarray")]
pub mod convert;

// ============================================================================
// Rectangular access
// ============================================================================
pub use layout::{
    as_flat, as_flat_mut, first_ptr, first_unchecked, get_unchecked, get_unchecked_mut, ptr_at,
    row_major_offset, try_as_flat, try_as_flat_mut, RectBuffer, RectBufferMut,
};

// ============================================================================
// Buffer providers
// ============================================================================
pub use view::{Array2, Rect2View, Rect2ViewMut};

// ============================================================================
// Byte views
// ============================================================================
pub use pod::{as_flat_bytes, as_flat_bytes_mut};

// ============================================================================
// Indexed enumeration
// ============================================================================
pub use enumerate::{make_enumeration, Cursor, CursorState, Enumerable};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while building or flattening rectangular buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StridedError {
    /// Backing store length does not match the requested shape.
    #[error("shape mismatch: {len} elements cannot form a {height}x{width} buffer")]
    ShapeMismatch {
        height: usize,
        width: usize,
        len: usize,
    },

    /// Stored length reported by the buffer disagrees with `height * width`.
    #[error("length mismatch: computed {computed} from shape, buffer stores {stored}")]
    LengthMismatch { computed: usize, stored: usize },

    /// Integer overflow while computing `height * width`.
    #[error("offset overflow while computing buffer length")]
    OffsetOverflow,

    /// Source array is not laid out in row-major (C) order.
    #[error("array is not in row-major standard layout")]
    NotRowMajor,
}

/// Result type for rectangular buffer operations.
pub type Result<T> = std::result::Result<T, StridedError>;
