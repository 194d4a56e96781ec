use super::scalar;
use super::*;
use crate::common::sample_format::SampleFormat;
use crate::common::test_utils::{plane_from_rows, random_plane, striped_rows};
use crate::frame::PlaneDesc;
use crate::ops::comb_mask::config::ThresholdPair;
use crate::ops::comb_mask::domain::NumericDomain;

fn u8_thresholds(low: i32, high: i32) -> IntThresholds {
    match NumericDomain::new(SampleFormat::U8, ThresholdPair::new(low, high).unwrap()).unwrap() {
        NumericDomain::U8(th) => th,
        other => panic!("unexpected domain {}", other),
    }
}

fn u16_thresholds(format: SampleFormat, low: i32, high: i32) -> IntThresholds {
    match NumericDomain::new(format, ThresholdPair::new(low, high).unwrap()).unwrap() {
        NumericDomain::U16 { thresholds, .. } => thresholds,
        other => panic!("unexpected domain {}", other),
    }
}

fn f32_thresholds(low: i32, high: i32) -> FloatThresholds {
    match NumericDomain::new(SampleFormat::F32, ThresholdPair::new(low, high).unwrap()).unwrap() {
        NumericDomain::F32(th) => th,
        other => panic!("unexpected domain {}", other),
    }
}

fn mask_u8(src: &Plane, th: &IntThresholds) -> Plane {
    let mut dst = Plane::new_zeroed(*src.desc()).unwrap();
    mask_plane(src, &mut dst, scalar::mask_row_u8, th);
    dst
}

// ============================================================================
// Pixel formula
// ============================================================================

#[test]
fn concrete_column_scenario() {
    let src = plane_from_rows::<u8>(
        SampleFormat::U8,
        &[&[100; 4], &[100; 4], &[200; 4], &[100; 4], &[100; 4]],
    );
    let dst = mask_u8(&src, &u8_thresholds(30, 30));

    assert_eq!(
        dst.to_samples::<u8>(),
        [[0u8; 4], [0; 4], [255; 4], [0; 4], [0; 4]].concat()
    );
}

#[test]
fn alternating_rows_are_flagged() {
    let src = plane_from_rows::<u8>(
        SampleFormat::U8,
        &[&[10; 4], &[200; 4], &[10; 4], &[200; 4], &[10; 4]],
    );
    let dst = mask_u8(&src, &u8_thresholds(30, 30));

    assert_eq!(
        dst.to_samples::<u8>(),
        [[0u8; 4], [255; 4], [255; 4], [255; 4], [0; 4]].concat()
    );
}

#[test]
fn uniform_plane_gives_zero() {
    let rows = vec![vec![77u8; 9]; 6];
    let row_refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
    let src = plane_from_rows(SampleFormat::U8, &row_refs);

    // low = 0 still maps a zero product to the ramp value 0
    for (low, high) in [(0, 0), (0, 255), (30, 30)] {
        let dst = mask_u8(&src, &u8_thresholds(low, high));
        assert!(dst.to_samples::<u8>().iter().all(|&v| v == 0));
    }
}

#[test]
fn monotonic_ramp_is_not_flagged() {
    let rows: Vec<Vec<u8>> = (0..8).map(|y| vec![y * 30; 5]).collect();
    let row_refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
    let src = plane_from_rows(SampleFormat::U8, &row_refs);

    let dst = mask_u8(&src, &u8_thresholds(0, 0));
    assert!(dst.to_samples::<u8>().iter().all(|&v| v == 0));
}

#[test]
fn threshold_boundaries() {
    let th = u8_thresholds(30, 30);

    // product == low stays in the ramp, product == low - 1 is cut
    assert_eq!(scalar::mask_int(5, 0, 6, &th), 30 >> 8);
    assert_eq!(scalar::mask_int(29, 0, 1, &th), 0);
    assert_eq!(scalar::mask_int(31, 0, 1, &th), 255);

    let th = u8_thresholds(0, 255);
    // 16 * 16 = 256 exceeds high
    assert_eq!(scalar::mask_int(16, 0, 16, &th), 255);
    // 15 * 17 = 255 is the top of the ramp
    assert_eq!(scalar::mask_int(15, 0, 17, &th), 0);
    // opposite signs never pass
    assert_eq!(scalar::mask_int(255, 128, 0, &th), 0);
}

#[test]
fn output_grows_with_matching_differences() {
    let th = u8_thresholds(10, 100);

    for mid in [0i64, 60, 128] {
        for (small, large) in [(1i64, 3i64), (3, 9), (9, 40), (40, 127)] {
            for other in [1i64, 5, 20, 100] {
                let darker = scalar::mask_int(mid + small, mid, mid + other, &th);
                let brighter = scalar::mask_int(mid + large, mid, mid + other, &th);
                assert!(darker <= brighter, "mid {} small {} large {}", mid, small, large);
            }
        }
    }
}

#[test]
fn ramp_reaches_non_zero_values() {
    let th = IntThresholds {
        low: 0,
        high: i32::MAX,
        shift: 0,
        peak: 255,
    };
    // 200 * 200 >> 8
    assert_eq!(scalar::mask_int(200, 0, 200, &th), 156);
}

#[test]
fn sixteen_bit_scale() {
    let th = u16_thresholds(SampleFormat::U16, 30, 30);
    assert_eq!(th.low, 30 * 257);

    // (60000 - 1000)^2 >> 8 is far above the threshold
    assert_eq!(scalar::mask_int(60000, 1000, 60000, &th), 65535);
    // neighbours agreeing with the center give nothing
    assert_eq!(scalar::mask_int(1000, 1000, 60000, &th), 0);

    let th = u16_thresholds(SampleFormat::U10, 30, 30);
    // 110 * 110 >> 2 = 3025 exceeds 120
    assert_eq!(scalar::mask_int(110, 0, 110, &th), 1023);
    // 21 * 22 >> 2 = 115 is below 120
    assert_eq!(scalar::mask_int(21, 0, 22, &th), 0);
}

#[test]
fn float_domain() {
    let th = f32_thresholds(30, 30);

    assert_eq!(scalar::mask_float(0.0, 0.9, 0.0, &th), 1.0);
    assert_eq!(scalar::mask_float(0.5, 0.5, 0.9, &th), 0.0);
    assert_eq!(scalar::mask_float(1.0, 0.0, 0.0, &th), 0.0);

    // the scaled product must stay within [0, 1] to land on the ramp
    let th = f32_thresholds(0, 255);
    let value = scalar::mask_float(0.05, 0.0, 0.05, &th);
    assert!((value - 0.0025).abs() < 1e-6, "ramp value {}", value);
    assert_eq!(scalar::mask_float(0.5, 0.0, 0.5, &th), 1.0);
}

// ============================================================================
// Plane driver
// ============================================================================

#[test]
fn borders_are_zeroed() {
    let src = random_plane(SampleFormat::U8, 37, 11, 0, 7);
    let mut dst = Plane::new_zeroed(*src.desc()).unwrap();
    dst.bytes_mut().fill(0xAB);

    mask_plane(&src, &mut dst, scalar::mask_row_u8, &u8_thresholds(0, 0));

    assert!(dst.row::<u8>(0).iter().all(|&v| v == 0));
    assert!(dst.row::<u8>(10).iter().all(|&v| v == 0));
}

#[test]
fn short_planes() {
    let th = u8_thresholds(30, 30);

    for height in 0..=2u32 {
        let desc = PlaneDesc::new(5, height, SampleFormat::U8);
        let src = Plane::from_samples(desc, &vec![200u8; 5 * height as usize]).unwrap();
        let mut dst = Plane::from_samples(desc, &vec![9u8; 5 * height as usize]).unwrap();

        mask_plane(&src, &mut dst, scalar::mask_row_u8, &th);
        assert!(dst.to_samples::<u8>().iter().all(|&v| v == 0), "height {}", height);
    }
}

#[test]
fn zero_width_plane() {
    let desc = PlaneDesc::new(0, 4, SampleFormat::U8);
    let src = Plane::new_zeroed(desc).unwrap();
    let mut dst = Plane::new_zeroed(desc).unwrap();

    mask_plane(&src, &mut dst, scalar::mask_row_u8, &u8_thresholds(30, 30));
    assert!(dst.to_samples::<u8>().is_empty());
}

#[test]
fn strides_do_not_change_output() {
    let src = random_plane(SampleFormat::U8, 23, 9, 0, 3);
    let padded_src = random_plane(SampleFormat::U8, 23, 9, 13, 3);
    assert_eq!(src.to_samples::<u8>(), padded_src.to_samples::<u8>());

    let th = u8_thresholds(10, 120);
    let mut dst = Plane::new_zeroed(*src.desc()).unwrap();
    let mut padded_dst = Plane::new_zeroed(PlaneDesc {
        stride: 128,
        ..*src.desc()
    })
    .unwrap();

    mask_plane(&src, &mut dst, scalar::mask_row_u8, &th);
    mask_plane(&padded_src, &mut padded_dst, scalar::mask_row_u8, &th);

    assert_eq!(dst.to_samples::<u8>(), padded_dst.to_samples::<u8>());
}

#[test]
fn striped_u16_plane_is_fully_flagged() {
    let rows = striped_rows::<u16>(6, 6, 0, 1023);
    let row_refs: Vec<&[u16]> = rows.iter().map(Vec::as_slice).collect();
    let src = plane_from_rows(SampleFormat::U10, &row_refs);
    let mut dst = Plane::new_zeroed(*src.desc()).unwrap();

    mask_plane(
        &src,
        &mut dst,
        scalar::mask_row_u16,
        &u16_thresholds(SampleFormat::U10, 30, 30),
    );

    for y in 0..6 {
        let expected = if y == 0 || y == 5 { 0 } else { 1023 };
        assert!(dst.row::<u16>(y).iter().all(|&v| v == expected), "row {}", y);
    }
}

#[test]
fn scalar_table_is_always_available() {
    let kernels = row_kernels(Capability::Scalar).unwrap();
    assert_eq!(kernels.capability, Capability::Scalar);
}
