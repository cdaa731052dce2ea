use bytemuck::Pod;

use crate::layout::{as_flat, as_flat_mut, RectBuffer, RectBufferMut};

/// Backing store of a POD buffer as raw bytes, for bulk copies.
///
/// # Panics
/// Same as [`as_flat`]: panics if the stored length disagrees with the shape.
pub fn as_flat_bytes<B>(buf: &B) -> &[u8]
where
    B: RectBuffer + ?Sized,
    B::Elem: Pod,
{
    bytemuck::cast_slice(as_flat(buf))
}

/// Mutable counterpart of [`as_flat_bytes`].
pub fn as_flat_bytes_mut<B>(buf: &mut B) -> &mut [u8]
where
    B: RectBufferMut + ?Sized,
    B::Elem: Pod,
{
    bytemuck::cast_slice_mut(as_flat_mut(buf))
}
