//! Row kernels and the plane driver that feeds them.
//!
//! Every row kernel receives the rows above, at and below the output row
//! plus the destination row, all `dst.len()` samples wide. Vector kernels
//! finish the row with the scalar kernel, so every tier produces the same
//! bits as [`scalar`].

pub(crate) mod scalar;
pub(crate) mod simd;

#[cfg(test)]
mod tests;

use bytemuck::Zeroable;

use super::domain::{FloatThresholds, IntThresholds};
use crate::common::sample_format::Sample;
use crate::frame::Plane;
use crate::ops::Capability;

pub(crate) type RowFn<T, P> = fn(up: &[T], mid: &[T], down: &[T], dst: &mut [T], params: &P);

/// Row kernels of one capability tier, one per numeric domain.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowKernels {
    pub(crate) capability: Capability,
    pub(crate) u8_row: RowFn<u8, IntThresholds>,
    pub(crate) u16_row: RowFn<u16, IntThresholds>,
    pub(crate) f32_row: RowFn<f32, FloatThresholds>,
}

/// Kernel table for `capability`, or `None` if the running CPU cannot
/// execute it.
pub(crate) fn row_kernels(capability: Capability) -> Option<RowKernels> {
    match capability {
        Capability::Scalar => Some(scalar::row_kernels()),
        _ => simd::row_kernels(capability),
    }
}

/// Computes the comb mask of `src` into `dst`.
///
/// The first and last output rows are zeroed; every interior row is
/// produced by `row_fn` from its three source neighbours.
pub(crate) fn mask_plane<T: Sample, P>(
    src: &Plane,
    dst: &mut Plane,
    row_fn: RowFn<T, P>,
    params: &P,
) {
    debug_assert!(src.desc().same_geometry(dst.desc()));

    let height = src.desc().height as usize;
    if height == 0 {
        return;
    }

    dst.row_mut::<T>(0).fill(T::zeroed());

    for y in 1..height.saturating_sub(1) {
        row_fn(
            src.row(y - 1),
            src.row(y),
            src.row(y + 1),
            dst.row_mut(y),
            params,
        );
    }

    if height > 1 {
        dst.row_mut::<T>(height - 1).fill(T::zeroed());
    }
}
