use aligned_vec::{AVec, ConstAlign};

use super::ALIGNMENT;

/// Aligns a row byte count to the plane allocation alignment.
pub(crate) fn align_stride(n: usize) -> usize {
    n.next_multiple_of(ALIGNMENT)
}

/// Allocates zeroed, aligned storage for `height` rows of `stride` bytes.
pub(crate) fn zeroed_storage(stride: usize, height: usize) -> AVec<u8, ConstAlign<ALIGNMENT>> {
    let mut bytes = AVec::with_capacity(ALIGNMENT, stride * height);
    bytes.resize(stride * height, 0);
    bytes
}

/// Copies tightly packed rows into strided storage, leaving padding zeroed.
pub(crate) fn add_stride_padding(
    src: &[u8],
    row_bytes: usize,
    height: usize,
    stride: usize,
) -> AVec<u8, ConstAlign<ALIGNMENT>> {
    let mut padded = zeroed_storage(stride, height);
    for y in 0..height {
        padded[y * stride..y * stride + row_bytes]
            .copy_from_slice(&src[y * row_bytes..(y + 1) * row_bytes]);
    }
    padded
}

/// Strips stride padding, returning tightly packed row data.
pub(crate) fn strip_stride_padding(
    src: &[u8],
    row_bytes: usize,
    height: usize,
    stride: usize,
) -> Vec<u8> {
    let mut packed = Vec::with_capacity(row_bytes * height);
    for y in 0..height {
        packed.extend_from_slice(&src[y * stride..y * stride + row_bytes]);
    }
    packed
}
