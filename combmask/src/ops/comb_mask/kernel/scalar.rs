use super::RowKernels;
use crate::ops::comb_mask::domain::{FloatThresholds, IntThresholds};
use crate::ops::Capability;

pub(crate) fn row_kernels() -> RowKernels {
    RowKernels {
        capability: Capability::Scalar,
        u8_row: mask_row_u8,
        u16_row: mask_row_u16,
        f32_row: mask_row_f32,
    }
}

/// Mask value of one integer sample.
///
/// The product is negative when `up` and `down` lie on opposite sides of
/// `mid`, which always falls below `low`.
#[inline]
pub(crate) fn mask_int(up: i64, mid: i64, down: i64, th: &IntThresholds) -> i64 {
    let product = ((up - mid) * (down - mid)) >> th.shift;

    if product < th.low as i64 {
        0
    } else if product > th.high as i64 {
        th.peak as i64
    } else {
        product >> 8
    }
}

#[inline]
pub(crate) fn mask_float(up: f32, mid: f32, down: f32, th: &FloatThresholds) -> f32 {
    let product = ((up - mid) * (down - mid)) * 255.0;

    if product < th.low {
        0.0
    } else if product > th.high {
        1.0
    } else {
        product / 255.0
    }
}

pub(crate) fn mask_row_u8(up: &[u8], mid: &[u8], down: &[u8], dst: &mut [u8], th: &IntThresholds) {
    for (((out, &u), &m), &d) in dst.iter_mut().zip(up).zip(mid).zip(down) {
        *out = mask_int(u as i64, m as i64, d as i64, th) as u8;
    }
}

pub(crate) fn mask_row_u16(
    up: &[u16],
    mid: &[u16],
    down: &[u16],
    dst: &mut [u16],
    th: &IntThresholds,
) {
    for (((out, &u), &m), &d) in dst.iter_mut().zip(up).zip(mid).zip(down) {
        *out = mask_int(u as i64, m as i64, d as i64, th) as u16;
    }
}

pub(crate) fn mask_row_f32(
    up: &[f32],
    mid: &[f32],
    down: &[f32],
    dst: &mut [f32],
    th: &FloatThresholds,
) {
    for (((out, &u), &m), &d) in dst.iter_mut().zip(up).zip(mid).zip(down) {
        *out = mask_float(u, m, d, th);
    }
}
