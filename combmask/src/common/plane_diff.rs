//! Plane comparison utilities.

use crate::common::sample_format::{SampleSize, SampleType};
use crate::frame::Plane;

/// Computes the maximum per-sample difference between two planes.
/// Integer differences are normalized by the format peak, floats are
/// compared as is.
///
/// Only compares sample data, ignoring stride padding.
///
/// # Panics
/// Panics if the planes have different geometry.
pub fn max_plane_diff(a: &Plane, b: &Plane) -> f64 {
    assert!(
        a.desc().same_geometry(b.desc()),
        "plane geometry mismatch: {} vs {}",
        a.desc(),
        b.desc()
    );

    let format = a.desc().format;
    let peak = format.peak() as f64;

    (0..a.desc().height as usize)
        .map(|y| match (format.sample_size, format.sample_type) {
            (SampleSize::_8bit, _) => {
                row_max_diff(a.row::<u8>(y), b.row::<u8>(y), |v| v as f64) / peak
            }
            (SampleSize::_16bit, _) => {
                row_max_diff(a.row::<u16>(y), b.row::<u16>(y), |v| v as f64) / peak
            }
            (SampleSize::_32bit, SampleType::Float) => {
                row_max_diff(a.row::<f32>(y), b.row::<f32>(y), |v| v as f64)
            }
            (SampleSize::_32bit, SampleType::UInt) => {
                unreachable!("32-bit integer planes are never allocated")
            }
        })
        .fold(0.0, f64::max)
}

fn row_max_diff<T: Copy>(a: &[T], b: &[T], to_f64: impl Fn(T) -> f64) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (to_f64(x) - to_f64(y)).abs())
        .fold(0.0, f64::max)
}

/// Returns true if both planes hold bit-identical samples.
///
/// Strides may differ; padding bytes are ignored.
pub fn planes_equal(a: &Plane, b: &Plane) -> bool {
    a.desc().same_geometry(b.desc())
        && (0..a.desc().height as usize).all(|y| a.row_bytes(y) == b.row_bytes(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::sample_format::SampleFormat;
    use crate::frame::PlaneDesc;

    #[test]
    fn equal_ignores_padding() {
        let samples: Vec<u8> = (0..12).collect();
        let packed = PlaneDesc {
            stride: 4,
            ..PlaneDesc::new(4, 3, SampleFormat::U8)
        };
        let a = Plane::from_samples(packed, &samples).unwrap();
        let mut b = Plane::from_samples(PlaneDesc::new(4, 3, SampleFormat::U8), &samples).unwrap();
        b.bytes_mut()[10] = 99;

        assert!(planes_equal(&a, &b));
        assert_eq!(max_plane_diff(&a, &b), 0.0);
    }

    #[test]
    fn diff_is_normalized_for_integers() {
        let desc = PlaneDesc::new(2, 1, SampleFormat::U10);
        let a = Plane::from_samples(desc, &[0u16, 1023]).unwrap();
        let b = Plane::from_samples(desc, &[0u16, 0]).unwrap();

        assert!(!planes_equal(&a, &b));
        assert_eq!(max_plane_diff(&a, &b), 1.0);
    }

    #[test]
    fn float_diff_is_absolute() {
        let desc = PlaneDesc::new(2, 1, SampleFormat::F32);
        let a = Plane::from_samples(desc, &[0.25f32, 0.5]).unwrap();
        let b = Plane::from_samples(desc, &[0.5f32, 0.5]).unwrap();

        assert_eq!(max_plane_diff(&a, &b), 0.25);
    }
}
