//! Benchmark module for the comb mask kernels.
//! Run with: cargo bench -p combmask --features bench --bench comb_mask

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use crate::prelude::*;

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

/// Register comb mask benchmarks with Criterion.
pub fn benchmarks(c: &mut Criterion) {
    for format in [SampleFormat::U8, SampleFormat::U16, SampleFormat::F32] {
        benchmark_tiers(c, format);
    }
}

/// Benchmark one 1080p luma plane per available backend tier.
fn benchmark_tiers(c: &mut Criterion, sample: SampleFormat) {
    let mut group = c.benchmark_group(format!("comb_mask_{}", sample));
    group.throughput(Throughput::Elements(WIDTH as u64 * HEIGHT as u64));

    let format = FrameFormat::gray(sample);
    let src = random_frame(FrameDesc::new(WIDTH, HEIGHT, format), sample);
    let mut dst = Frame::new_zeroed(*src.desc()).unwrap();

    for capability in Capability::iter() {
        let config = CombMaskConfig::default().capability(capability.into());
        let Ok(filter) = CombMask::new(config, format) else {
            continue;
        };

        group.bench_function(BenchmarkId::new("process", capability), |b| {
            b.iter(|| filter.process_into(black_box(&src), &mut dst).unwrap())
        });
    }

    group.finish();
}

fn random_frame(desc: FrameDesc, sample: SampleFormat) -> Frame {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let plane_desc = desc.plane_desc(0);
    let count = plane_desc.width as usize * plane_desc.height as usize;

    let plane = match sample.sample_size {
        SampleSize::_8bit => {
            let samples: Vec<u8> = (0..count).map(|_| rng.random()).collect();
            Plane::from_samples(plane_desc, &samples)
        }
        SampleSize::_16bit => {
            let peak = sample.peak();
            let samples: Vec<u16> = (0..count)
                .map(|_| rng.random_range(0..=peak) as u16)
                .collect();
            Plane::from_samples(plane_desc, &samples)
        }
        SampleSize::_32bit => {
            let samples: Vec<f32> = (0..count).map(|_| rng.random()).collect();
            Plane::from_samples(plane_desc, &samples)
        }
    }
    .unwrap();

    Frame::from_planes(desc, vec![plane]).unwrap()
}
