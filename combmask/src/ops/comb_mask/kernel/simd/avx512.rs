//! AVX-512 comb mask kernels.
//!
//! Samples are widened on load so every product is formed in lanes wide
//! enough to hold it. Comparisons produce mask registers instead of vector
//! masks.

use std::arch::x86_64::*;

use crate::ops::comb_mask::domain::{FloatThresholds, IntThresholds};
use crate::ops::comb_mask::kernel::{scalar, RowKernels};
use crate::ops::Capability;

pub(crate) fn row_kernels() -> RowKernels {
    RowKernels {
        capability: Capability::Avx512,
        u8_row: mask_row_u8,
        u16_row: mask_row_u16,
        f32_row: mask_row_f32,
    }
}

fn mask_row_u8(up: &[u8], mid: &[u8], down: &[u8], dst: &mut [u8], th: &IntThresholds) {
    // SAFETY: this table is only handed out after the AVX-512 check in `simd::row_kernels`
    unsafe { mask_row_u8_avx512(up, mid, down, dst, th) }
}

fn mask_row_u16(up: &[u16], mid: &[u16], down: &[u16], dst: &mut [u16], th: &IntThresholds) {
    // SAFETY: see `mask_row_u8`
    unsafe { mask_row_u16_avx512(up, mid, down, dst, th) }
}

fn mask_row_f32(up: &[f32], mid: &[f32], down: &[f32], dst: &mut [f32], th: &FloatThresholds) {
    // SAFETY: see `mask_row_u8`
    unsafe { mask_row_f32_avx512(up, mid, down, dst, th) }
}

/// 32 samples per iteration, zero-extended to 16-bit lanes.
#[target_feature(enable = "avx512f,avx512bw")]
pub(crate) unsafe fn mask_row_u8_avx512(
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
        let low = _mm512_set1_epi16(th.low as i16);
        let high = _mm512_set1_epi16(th.high as i16);
        let peak = _mm512_set1_epi16(th.peak as i16);

        while x + 32 <= width {
            let u = _mm512_cvtepu8_epi16(_mm256_loadu_si256(up.as_ptr().add(x) as *const __m256i));
            let m = _mm512_cvtepu8_epi16(_mm256_loadu_si256(mid.as_ptr().add(x) as *const __m256i));
            let d = _mm512_cvtepu8_epi16(_mm256_loadu_si256(down.as_ptr().add(x) as *const __m256i));

            let prod = _mm512_add_epi16(
                _mm512_mullo_epi16(_mm512_subs_epu16(u, m), _mm512_subs_epu16(d, m)),
                _mm512_mullo_epi16(_mm512_subs_epu16(m, u), _mm512_subs_epu16(m, d)),
            );

            let below = _mm512_cmplt_epu16_mask(prod, low);
            let above = _mm512_cmpgt_epu16_mask(prod, high);
            let ramp = _mm512_srli_epi16::<8>(prod);

            let value = _mm512_mask_blend_epi16(above, ramp, peak);
            let res = _mm512_maskz_mov_epi16(!below, value);

            _mm256_storeu_si256(
                dst.as_mut_ptr().add(x) as *mut __m256i,
                _mm512_cvtepi16_epi8(res),
            );
            x += 32;
        }
    }

    scalar::mask_row_u8(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}

/// 16 samples per iteration, zero-extended to 32-bit lanes.
#[target_feature(enable = "avx512f,avx512bw")]
pub(crate) unsafe fn mask_row_u16_avx512(
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
        let low = _mm512_set1_epi32(th.low);
        let high = _mm512_set1_epi32(th.high);
        let peak = _mm512_set1_epi32(th.peak);

        while x + 16 <= width {
            let u = _mm512_cvtepu16_epi32(_mm256_loadu_si256(up.as_ptr().add(x) as *const __m256i));
            let m = _mm512_cvtepu16_epi32(_mm256_loadu_si256(mid.as_ptr().add(x) as *const __m256i));
            let d = _mm512_cvtepu16_epi32(_mm256_loadu_si256(down.as_ptr().add(x) as *const __m256i));

            // max(a, m) - m and m - min(a, m) are the two saturated differences
            let pos_up = _mm512_sub_epi32(_mm512_max_epu32(u, m), m);
            let neg_up = _mm512_sub_epi32(m, _mm512_min_epu32(u, m));
            let pos_down = _mm512_sub_epi32(_mm512_max_epu32(d, m), m);
            let neg_down = _mm512_sub_epi32(m, _mm512_min_epu32(d, m));

            // each term is below 2^32, so the low half of the product is exact
            let prod = _mm512_add_epi32(
                _mm512_mullo_epi32(pos_up, pos_down),
                _mm512_mullo_epi32(neg_up, neg_down),
            );
            let prod = _mm512_srl_epi32(prod, shift);

            let below = _mm512_cmplt_epi32_mask(prod, low);
            let above = _mm512_cmpgt_epi32_mask(prod, high);
            let ramp = _mm512_srli_epi32::<8>(prod);

            let value = _mm512_mask_blend_epi32(above, ramp, peak);
            let res = _mm512_maskz_mov_epi32(!below, value);

            _mm256_storeu_si256(
                dst.as_mut_ptr().add(x) as *mut __m256i,
                _mm512_cvtepi32_epi16(res),
            );
            x += 16;
        }
    }

    scalar::mask_row_u16(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}

/// 16 samples per iteration.
#[target_feature(enable = "avx512f,avx512bw")]
pub(crate) unsafe fn mask_row_f32_avx512(
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
        let low = _mm512_set1_ps(th.low);
        let high = _mm512_set1_ps(th.high);
        let one = _mm512_set1_ps(1.0);
        let scale = _mm512_set1_ps(255.0);

        while x + 16 <= width {
            let u = _mm512_loadu_ps(up.as_ptr().add(x));
            let m = _mm512_loadu_ps(mid.as_ptr().add(x));
            let d = _mm512_loadu_ps(down.as_ptr().add(x));

            let prod = _mm512_mul_ps(
                _mm512_mul_ps(_mm512_sub_ps(u, m), _mm512_sub_ps(d, m)),
                scale,
            );
            let below = _mm512_cmp_ps_mask::<_CMP_LT_OQ>(prod, low);
            let above = _mm512_cmp_ps_mask::<_CMP_GT_OQ>(prod, high);
            let ramp = _mm512_div_ps(prod, scale);

            let value = _mm512_mask_blend_ps(above, ramp, one);
            _mm512_storeu_ps(dst.as_mut_ptr().add(x), _mm512_maskz_mov_ps(!below, value));
            x += 16;
        }
    }

    scalar::mask_row_f32(&up[x..], &mid[x..], &down[x..], &mut dst[x..], th);
}
