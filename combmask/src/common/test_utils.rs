use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::frame_format::FrameFormat;
use crate::common::sample_format::{Sample, SampleFormat, SampleSize};
use crate::frame::{Frame, FrameDesc, Plane, PlaneDesc};

/// Row widths that cover every vector body/tail split of every tier.
pub const TEST_WIDTHS: [usize; 15] = [1, 3, 4, 7, 8, 15, 16, 17, 31, 32, 33, 63, 64, 65, 100];

/// Plane built from literal rows, using the default aligned stride.
pub fn plane_from_rows<T: Sample>(format: SampleFormat, rows: &[&[T]]) -> Plane {
    let width = rows.first().map_or(0, |row| row.len());
    let samples: Vec<T> = rows.iter().flat_map(|row| row.iter().copied()).collect();
    let desc = PlaneDesc::new(width as u32, rows.len() as u32, format);

    Plane::from_samples(desc, &samples).unwrap()
}

/// Random samples covering the full value range of `format`.
///
/// Integer planes get values in `0..=peak`, float planes in `[0, 1)`.
pub fn random_samples(format: SampleFormat, count: usize, seed: u64) -> RandomSamples {
    let mut rng = StdRng::seed_from_u64(seed);
    let peak = format.peak();

    match format.sample_size {
        SampleSize::_8bit => RandomSamples::U8((0..count).map(|_| rng.random::<u8>()).collect()),
        SampleSize::_16bit => RandomSamples::U16(
            (0..count)
                .map(|_| rng.random_range(0..=peak) as u16)
                .collect(),
        ),
        SampleSize::_32bit => {
            RandomSamples::F32((0..count).map(|_| rng.random::<f32>()).collect())
        }
    }
}

pub enum RandomSamples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

/// Random plane with the given stride padding on top of the packed row size.
pub fn random_plane(format: SampleFormat, width: u32, height: u32, padding: usize, seed: u64) -> Plane {
    let desc = PlaneDesc {
        stride: width as usize * format.byte_count() as usize + padding,
        ..PlaneDesc::new(width, height, format)
    };
    let count = width as usize * height as usize;

    match random_samples(format, count, seed) {
        RandomSamples::U8(samples) => Plane::from_samples(desc, &samples),
        RandomSamples::U16(samples) => Plane::from_samples(desc, &samples),
        RandomSamples::F32(samples) => Plane::from_samples(desc, &samples),
    }
    .unwrap()
}

/// Random frame with default strides. Each plane gets its own seed.
pub fn random_frame(format: FrameFormat, width: u32, height: u32, seed: u64) -> Frame {
    let desc = FrameDesc::new(width, height, format);
    let planes = (0..format.plane_count())
        .map(|i| {
            let plane_desc = desc.plane_desc(i);
            random_plane(
                format.sample,
                plane_desc.width,
                plane_desc.height,
                0,
                seed + i as u64,
            )
        })
        .collect();

    Frame::from_planes(desc, planes).unwrap()
}

/// Rows alternating between `dark` and `bright`, the strongest combing pattern.
pub fn striped_rows<T: Sample>(width: usize, height: usize, dark: T, bright: T) -> Vec<Vec<T>> {
    (0..height)
        .map(|y| vec![if y % 2 == 0 { dark } else { bright }; width])
        .collect()
}
