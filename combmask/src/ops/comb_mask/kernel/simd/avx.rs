//! AVX2 comb mask kernels. Same positive-part product as the SSE2 tier.

use std::arch::x86_64::*;

use crate::ops::comb_mask::domain::{FloatThresholds, IntThresholds};
use crate::ops::comb_mask::kernel::{scalar, RowKernels};
use crate::ops::Capability;

pub(crate) fn row_kernels() -> RowKernels {
    RowKernels {
        capability: Capability::Avx2,
        u8_row: mask_row_u8,
        u16_row: mask_row_u16,
        f32_row: mask_row_f32,
    }
}

fn mask_row_u8(up: &[u8], mid: &[u8], down: &[u8], dst: &mut [u8], th: &IntThresholds) {
    // SAFETY: this table is only handed out after the AVX2 check in `simd::row_kernels`
    unsafe { mask_row_u8_avx2(up, mid, down, dst, th) }
}

fn mask_row_u16(up: &[u16], mid: &[u16], down: &[u16], dst: &mut [u16], th: &IntThresholds) {
    // SAFETY: see `mask_row_u8`
    unsafe { mask_row_u16_avx2(up, mid, down, dst, th) }
}

fn mask_row_f32(up: &[f32], mid: &[f32], down: &[f32], dst: &mut [f32], th: &FloatThresholds) {
    // SAFETY: see `mask_row_u8`
    unsafe { mask_row_f32_avx2(up, mid, down, dst, th) }
}

/// 32 samples per iteration. The in-lane unpack and pack pair keeps the
/// original sample order.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn mask_row_u8_avx2(
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
        let zero = _mm256_setzero_si256();
        let low = _mm256_set1_epi16(th.low as i16);
        let high = _mm256_set1_epi16(th.high as i16);
        let peak = _mm256_set1_epi16(th.peak as i16);

        while x + 32 <= width {
            let u = _mm256_loadu_si256(up.as_ptr().add(x) as *const __m256i);
            let m = _mm256_loadu_si256(mid.as_ptr().add(x) as *const __m256i);
            let d = _mm256_loadu_si256(down.as_ptr().add(x) as *const __m256i);

            let pos_up = _mm256_subs_epu8(u, m);
            let neg_up = _mm256_subs_epu8(m, u);
            let pos_down = _mm256_subs_epu8(d, m);
            let neg_down = _mm256_subs_epu8(m, d);

            let prod_lo = _mm256_add_epi16(
                _mm256_mullo_epi16(
                    _mm256_unpacklo_epi8(pos_up, zero),
                    _mm256_unpacklo_epi8(pos_down, zero),
                ),
                _mm256_mullo_epi16(
                    _mm256_unpacklo_epi8(neg_up, zero),
                    _mm256_unpacklo_epi8(neg_down, zero),
                ),
            );
            let prod_hi = _mm256_add_epi16(
                _mm256_mullo_epi16(
                    _mm256_unpackhi_epi8(pos_up, zero),
                    _mm256_unpackhi_epi8(pos_down, zero),
                ),
                _mm256_mullo_epi16(
                    _mm256_unpackhi_epi8(neg_up, zero),
                    _mm256_unpackhi_epi8(neg_down, zero),
                ),
            );

            let res_lo = threshold_epu16(prod_lo, low, high, peak);
            let res_hi = threshold_epu16(prod_hi, low, high, peak);

            _mm256_storeu_si256(
                dst.as_mut_ptr().add(x) as *mut __m256i,
                _mm256_packus_epi16(res_lo, res_hi),
            );
            x += 32;
        }
    }

    scalar::mask_row_u8(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn threshold_epu16(prod: __m256i, low: __m256i, high: __m256i, peak: __m256i) -> __m256i {
    // max(a, b) == a  <=>  a >= b, unsigned
    let at_least_low = _mm256_cmpeq_epi16(_mm256_max_epu16(prod, low), prod);
    let above = _mm256_xor_si256(
        _mm256_cmpeq_epi16(_mm256_max_epu16(high, prod), high),
        _mm256_set1_epi16(-1),
    );
    let ramp = _mm256_srli_epi16::<8>(prod);

    let value = _mm256_blendv_epi8(ramp, peak, above);
    _mm256_and_si256(at_least_low, value)
}

/// 16 samples per iteration.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn mask_row_u16_avx2(
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
        let low = _mm256_set1_epi32(th.low);
        let high = _mm256_set1_epi32(th.high);
        let peak = _mm256_set1_epi32(th.peak);

        while x + 16 <= width {
            let u = _mm256_loadu_si256(up.as_ptr().add(x) as *const __m256i);
            let m = _mm256_loadu_si256(mid.as_ptr().add(x) as *const __m256i);
            let d = _mm256_loadu_si256(down.as_ptr().add(x) as *const __m256i);

            let (pos_lo, pos_hi) =
                widening_mul_epu16(_mm256_subs_epu16(u, m), _mm256_subs_epu16(d, m));
            let (neg_lo, neg_hi) =
                widening_mul_epu16(_mm256_subs_epu16(m, u), _mm256_subs_epu16(m, d));

            let prod_lo = _mm256_srl_epi32(_mm256_add_epi32(pos_lo, neg_lo), shift);
            let prod_hi = _mm256_srl_epi32(_mm256_add_epi32(pos_hi, neg_hi), shift);

            let res_lo = threshold_epi32(prod_lo, low, high, peak);
            let res_hi = threshold_epi32(prod_hi, low, high, peak);

            _mm256_storeu_si256(
                dst.as_mut_ptr().add(x) as *mut __m256i,
                _mm256_packus_epi32(res_lo, res_hi),
            );
            x += 16;
        }
    }

    scalar::mask_row_u16(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn widening_mul_epu16(a: __m256i, b: __m256i) -> (__m256i, __m256i) {
    let lo = _mm256_mullo_epi16(a, b);
    let hi = _mm256_mulhi_epu16(a, b);
    (_mm256_unpacklo_epi16(lo, hi), _mm256_unpackhi_epi16(lo, hi))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn threshold_epi32(prod: __m256i, low: __m256i, high: __m256i, peak: __m256i) -> __m256i {
    let below = _mm256_cmpgt_epi32(low, prod);
    let above = _mm256_cmpgt_epi32(prod, high);
    let ramp = _mm256_srli_epi32::<8>(prod);

    let value = _mm256_blendv_epi8(ramp, peak, above);
    _mm256_andnot_si256(below, value)
}

/// 8 samples per iteration.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn mask_row_f32_avx2(
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
        let low = _mm256_set1_ps(th.low);
        let high = _mm256_set1_ps(th.high);
        let zero = _mm256_setzero_ps();
        let one = _mm256_set1_ps(1.0);
        let scale = _mm256_set1_ps(255.0);

        while x + 8 <= width {
            let u = _mm256_loadu_ps(up.as_ptr().add(x));
            let m = _mm256_loadu_ps(mid.as_ptr().add(x));
            let d = _mm256_loadu_ps(down.as_ptr().add(x));

            let prod = _mm256_mul_ps(
                _mm256_mul_ps(_mm256_sub_ps(u, m), _mm256_sub_ps(d, m)),
                scale,
            );
            let below = _mm256_cmp_ps::<_CMP_LT_OQ>(prod, low);
            let above = _mm256_cmp_ps::<_CMP_GT_OQ>(prod, high);
            let ramp = _mm256_div_ps(prod, scale);

            let value = _mm256_blendv_ps(ramp, one, above);
            _mm256_storeu_ps(dst.as_mut_ptr().add(x), _mm256_blendv_ps(value, zero, below));
            x += 8;
        }
    }

    scalar::mask_row_f32(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}
