//! Builds a synthetic interlaced frame and prints how much of it the comb
//! mask flags.
//!
//! Usage: cargo run -p combmask --example comb_mask [config.yaml|config.json]

use anyhow::Context;
use combmask::prelude::*;
use tracing::info;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn main() -> anyhow::Result<()> {
    common::log_setup::setup_logging("info,combmask=debug", "comb_mask");

    let config: CombMaskConfig = match std::env::args().nth(1) {
        Some(path) => common::load_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => CombMaskConfig::default(),
    };
    info!("{}", common::serialize(&config, common::FileFormat::Yaml)?);

    let format = FrameFormat::yuv420(SampleFormat::U8);
    let filter = CombMask::new(config, format)?;
    info!(
        "Backend {} (detected {}), {:?} scheduling",
        filter.capability(),
        Capability::detect(),
        filter.thread_safety()
    );

    let src = interlaced_frame(format)?;
    let mask = filter.process(&src)?;

    for index in 0..mask.plane_count() {
        let plane = mask.plane(index);
        let samples = plane.to_samples::<u8>();
        let flagged = samples.iter().filter(|&&v| v > 0).count();
        info!(
            "Plane {} ({:?}): {} of {} samples flagged",
            index,
            filter.plane_mode(index),
            flagged,
            samples.len()
        );
    }

    Ok(())
}

/// A bright square moving right between the two fields: even rows see it at
/// one position, odd rows eight columns further.
fn interlaced_frame(format: FrameFormat) -> anyhow::Result<Frame> {
    let desc = FrameDesc::new(WIDTH, HEIGHT, format);

    let luma_desc = desc.plane_desc(0);
    let mut luma = vec![16u8; (WIDTH * HEIGHT) as usize];
    for y in 80..160 {
        let offset = if y % 2 == 0 { 0 } else { 8 };
        for x in (120 + offset)..(200 + offset) {
            luma[(y * WIDTH + x) as usize] = 235;
        }
    }

    let mut planes = vec![Plane::from_samples(luma_desc, &luma)?];
    for index in 1..format.plane_count() {
        let chroma_desc = desc.plane_desc(index);
        let count = chroma_desc.width as usize * chroma_desc.height as usize;
        planes.push(Plane::from_samples(chroma_desc, &vec![128u8; count])?);
    }

    Ok(Frame::from_planes(desc, planes)?)
}
