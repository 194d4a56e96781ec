//! SSE2 comb mask kernels.
//!
//! The signed product `(up - mid) * (down - mid)` is replaced by its positive
//! part `sat(up - mid) * sat(down - mid) + sat(mid - up) * sat(mid - down)`,
//! where at most one term is non-zero. A negative product always maps to 0
//! and so does a zero product, so the outputs match the scalar kernel while
//! every intermediate stays unsigned.

use std::arch::x86_64::*;

use crate::ops::comb_mask::domain::{FloatThresholds, IntThresholds};
use crate::ops::comb_mask::kernel::{scalar, RowKernels};
use crate::ops::Capability;

pub(crate) fn row_kernels() -> RowKernels {
    RowKernels {
        capability: Capability::Sse2,
        u8_row: mask_row_u8,
        u16_row: mask_row_u16,
        f32_row: mask_row_f32,
    }
}

fn mask_row_u8(up: &[u8], mid: &[u8], down: &[u8], dst: &mut [u8], th: &IntThresholds) {
    // SAFETY: this table is only handed out after the SSE2 check in `simd::row_kernels`
    unsafe { mask_row_u8_sse2(up, mid, down, dst, th) }
}

fn mask_row_u16(up: &[u16], mid: &[u16], down: &[u16], dst: &mut [u16], th: &IntThresholds) {
    // SAFETY: see `mask_row_u8`
    unsafe { mask_row_u16_sse2(up, mid, down, dst, th) }
}

fn mask_row_f32(up: &[f32], mid: &[f32], down: &[f32], dst: &mut [f32], th: &FloatThresholds) {
    // SAFETY: see `mask_row_u8`
    unsafe { mask_row_f32_sse2(up, mid, down, dst, th) }
}

// ============================================================================
// 8-bit
// ============================================================================

/// 16 samples per iteration, widened to 16-bit lanes.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mask_row_u8_sse2(
    up: &[u8],
    mid: &[u8],
    down: &[u8],
    dst: &mut [u8],
    th: &IntThresholds,
) {
    let width = dst.len();
    assert!(up.len() >= width && mid.len() >= width && down.len() >= width);

    let mut x = 0;

    unsafe {
        let zero = _mm_setzero_si128();
        let low = _mm_set1_epi16(th.low as i16);
        let high = _mm_set1_epi16(th.high as i16);
        let peak = _mm_set1_epi16(th.peak as i16);

        while x + 16 <= width {
            let u = _mm_loadu_si128(up.as_ptr().add(x) as *const __m128i);
            let m = _mm_loadu_si128(mid.as_ptr().add(x) as *const __m128i);
            let d = _mm_loadu_si128(down.as_ptr().add(x) as *const __m128i);

            let pos_up = _mm_subs_epu8(u, m);
            let neg_up = _mm_subs_epu8(m, u);
            let pos_down = _mm_subs_epu8(d, m);
            let neg_down = _mm_subs_epu8(m, d);

            let prod_lo = _mm_add_epi16(
                _mm_mullo_epi16(
                    _mm_unpacklo_epi8(pos_up, zero),
                    _mm_unpacklo_epi8(pos_down, zero),
                ),
                _mm_mullo_epi16(
                    _mm_unpacklo_epi8(neg_up, zero),
                    _mm_unpacklo_epi8(neg_down, zero),
                ),
            );
            let prod_hi = _mm_add_epi16(
                _mm_mullo_epi16(
                    _mm_unpackhi_epi8(pos_up, zero),
                    _mm_unpackhi_epi8(pos_down, zero),
                ),
                _mm_mullo_epi16(
                    _mm_unpackhi_epi8(neg_up, zero),
                    _mm_unpackhi_epi8(neg_down, zero),
                ),
            );

            let res_lo = threshold_epu16(prod_lo, low, high, peak);
            let res_hi = threshold_epu16(prod_hi, low, high, peak);

            _mm_storeu_si128(
                dst.as_mut_ptr().add(x) as *mut __m128i,
                _mm_packus_epi16(res_lo, res_hi),
            );
            x += 16;
        }
    }

    scalar::mask_row_u8(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}

/// Thresholds unsigned 16-bit products. SSE2 has no unsigned 16-bit compare,
/// so `a >= b` is tested as `sat(b - a) == 0`.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn threshold_epu16(prod: __m128i, low: __m128i, high: __m128i, peak: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    let at_least_low = _mm_cmpeq_epi16(_mm_subs_epu16(low, prod), zero);
    let at_most_high = _mm_cmpeq_epi16(_mm_subs_epu16(prod, high), zero);
    let ramp = _mm_srli_epi16::<8>(prod);

    let value = _mm_or_si128(
        _mm_and_si128(at_most_high, ramp),
        _mm_andnot_si128(at_most_high, peak),
    );
    _mm_and_si128(at_least_low, value)
}

// ============================================================================
// 16-bit
// ============================================================================

/// 8 samples per iteration. Products are formed as 32-bit values from the
/// low and high halves of the 16x16 multiply.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mask_row_u16_sse2(
    up: &[u16],
    mid: &[u16],
    down: &[u16],
    dst: &mut [u16],
    th: &IntThresholds,
) {
    let width = dst.len();
    assert!(up.len() >= width && mid.len() >= width && down.len() >= width);

    let mut x = 0;

    unsafe {
        let shift = _mm_cvtsi32_si128(th.shift as i32);
        let low = _mm_set1_epi32(th.low);
        let high = _mm_set1_epi32(th.high);
        let peak = _mm_set1_epi32(th.peak);
        // signed pack of unsigned 16-bit results
        let bias = _mm_set1_epi32(0x8000);
        let flip = _mm_set1_epi16(i16::MIN);

        while x + 8 <= width {
            let u = _mm_loadu_si128(up.as_ptr().add(x) as *const __m128i);
            let m = _mm_loadu_si128(mid.as_ptr().add(x) as *const __m128i);
            let d = _mm_loadu_si128(down.as_ptr().add(x) as *const __m128i);

            let (pos_lo, pos_hi) = widening_mul_epu16(_mm_subs_epu16(u, m), _mm_subs_epu16(d, m));
            let (neg_lo, neg_hi) = widening_mul_epu16(_mm_subs_epu16(m, u), _mm_subs_epu16(m, d));

            let prod_lo = _mm_srl_epi32(_mm_add_epi32(pos_lo, neg_lo), shift);
            let prod_hi = _mm_srl_epi32(_mm_add_epi32(pos_hi, neg_hi), shift);

            let res_lo = threshold_epi32(prod_lo, low, high, peak);
            let res_hi = threshold_epi32(prod_hi, low, high, peak);

            let packed = _mm_xor_si128(
                _mm_packs_epi32(_mm_sub_epi32(res_lo, bias), _mm_sub_epi32(res_hi, bias)),
                flip,
            );
            _mm_storeu_si128(dst.as_mut_ptr().add(x) as *mut __m128i, packed);
            x += 8;
        }
    }

    scalar::mask_row_u16(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}

/// Full 32-bit products of eight unsigned 16-bit lane pairs.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn widening_mul_epu16(a: __m128i, b: __m128i) -> (__m128i, __m128i) {
    let lo = _mm_mullo_epi16(a, b);
    let hi = _mm_mulhi_epu16(a, b);
    (_mm_unpacklo_epi16(lo, hi), _mm_unpackhi_epi16(lo, hi))
}

/// Products here are already shifted right by at least 2, so they fit a
/// signed 32-bit compare.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn threshold_epi32(prod: __m128i, low: __m128i, high: __m128i, peak: __m128i) -> __m128i {
    let below = _mm_cmplt_epi32(prod, low);
    let above = _mm_cmpgt_epi32(prod, high);
    let ramp = _mm_srli_epi32::<8>(prod);

    let value = _mm_or_si128(_mm_and_si128(above, peak), _mm_andnot_si128(above, ramp));
    _mm_andnot_si128(below, value)
}

// ============================================================================
// 32-bit float
// ============================================================================

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mask_row_f32_sse2(
    up: &[f32],
    mid: &[f32],
    down: &[f32],
    dst: &mut [f32],
    th: &FloatThresholds,
) {
    let width = dst.len();
    assert!(up.len() >= width && mid.len() >= width && down.len() >= width);

    let mut x = 0;

    unsafe {
        let low = _mm_set1_ps(th.low);
        let high = _mm_set1_ps(th.high);
        let one = _mm_set1_ps(1.0);
        let scale = _mm_set1_ps(255.0);

        while x + 4 <= width {
            let u = _mm_loadu_ps(up.as_ptr().add(x));
            let m = _mm_loadu_ps(mid.as_ptr().add(x));
            let d = _mm_loadu_ps(down.as_ptr().add(x));

            let prod = _mm_mul_ps(_mm_mul_ps(_mm_sub_ps(u, m), _mm_sub_ps(d, m)), scale);
            let below = _mm_cmplt_ps(prod, low);
            let above = _mm_cmpgt_ps(prod, high);
            let ramp = _mm_div_ps(prod, scale);

            let value = _mm_or_ps(_mm_and_ps(above, one), _mm_andnot_ps(above, ramp));
            _mm_storeu_ps(dst.as_mut_ptr().add(x), _mm_andnot_ps(below, value));
            x += 4;
        }
    }

    scalar::mask_row_f32(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}
