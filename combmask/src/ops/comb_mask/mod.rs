mod config;
mod domain;
pub(crate) mod kernel;


use tracing::{debug, trace};

pub use config::{CombMaskConfig, PlaneMode, ThreadSafety, ThresholdPair};
pub use domain::{FloatThresholds, IntThresholds, NumericDomain};

use crate::common::error::{Error, Result};
use crate::common::frame_format::FrameFormat;
use crate::frame::{Frame, Plane};
use crate::ops::{select_backend, Capability};
use kernel::RowKernels;

/// Interlacing comb mask filter.
///
/// Each interior output row scores how strongly the source row deviates
/// from both of its vertical neighbours in the same direction. Rows 0 and
/// `height - 1` of every processed plane are zero.
///
/// All validation happens in [`CombMask::new`]. A constructed filter holds
/// no mutable state, so one instance can process frames from any number of
/// threads at once.
///
/// # Example
/// ```no_run
/// use combmask::prelude::*;
///
/// let format = FrameFormat::yuv420(SampleFormat::U8);
/// let filter = CombMask::new(CombMaskConfig::default(), format).unwrap();
///
/// let src = Frame::new_zeroed(FrameDesc::new(64, 48, format)).unwrap();
/// let mask = filter.process(&src).unwrap();
/// assert_eq!(mask.plane_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CombMask {
    config: CombMaskConfig,
    format: FrameFormat,
    thresholds: ThresholdPair,
    domain: NumericDomain,
    kernels: RowKernels,
}

impl CombMask {
    /// Builds a filter for frames of `format`, probing the CPU for the
    /// backend tier.
    pub fn new(config: CombMaskConfig, format: FrameFormat) -> Result<CombMask> {
        Self::with_detected(config, format, Capability::detect())
    }

    /// Builds a filter treating `detected` as the highest tier the CPU offers.
    ///
    /// A tier the CPU cannot actually execute is still rejected.
    pub fn with_detected(
        config: CombMaskConfig,
        format: FrameFormat,
        detected: Capability,
    ) -> Result<CombMask> {
        format.validate()?;
        let thresholds = config.validate()?;
        let capability = select_backend(config.capability, detected)?;
        let domain = NumericDomain::new(format.sample, thresholds)?;

        let kernels =
            kernel::row_kernels(capability).ok_or_else(|| Error::UnsupportedCapability {
                requested: capability,
                detected: Capability::detect(),
            })?;

        debug!(
            "Comb mask for {}: {}, planes {:?}, {} backend, {} samples per register (detected {})",
            format,
            domain,
            config.plane_modes_array(),
            capability,
            capability.lanes(format.sample.byte_count() as usize),
            detected
        );

        Ok(CombMask {
            config,
            format,
            thresholds,
            domain,
            kernels,
        })
    }

    pub fn config(&self) -> &CombMaskConfig {
        &self.config
    }

    pub fn format(&self) -> &FrameFormat {
        &self.format
    }

    pub fn thresholds(&self) -> ThresholdPair {
        self.thresholds
    }

    pub fn domain(&self) -> &NumericDomain {
        &self.domain
    }

    /// Backend tier every frame is processed with.
    pub fn capability(&self) -> Capability {
        self.kernels.capability
    }

    /// Scheduling class declared to the host.
    pub fn thread_safety(&self) -> ThreadSafety {
        self.config.thread_safety
    }

    /// Mode of color plane `index`.
    ///
    /// # Panics
    /// Panics if `index` is not 0, 1 or 2.
    pub fn plane_mode(&self, index: usize) -> PlaneMode {
        self.config.plane_modes_array()[index]
    }

    /// Processes `src` into a newly allocated frame.
    ///
    /// `Untouched` planes of the result are zero.
    pub fn process(&self, src: &Frame) -> Result<Frame> {
        let mut dst = Frame::new_zeroed(*src.desc())?;
        self.process_into(src, &mut dst)?;

        Ok(dst)
    }

    /// Processes `src` into `dst`, which must have the same descriptor.
    /// Plane strides may differ between the two frames.
    ///
    /// `Untouched` planes of `dst` keep their previous content.
    pub fn process_into(&self, src: &Frame, dst: &mut Frame) -> Result<()> {
        self.check_frame(src, "source")?;
        if dst.desc() != src.desc() {
            return Err(Error::FrameMismatch(format!(
                "destination {} differs from source {}",
                dst.desc(),
                src.desc()
            )));
        }

        trace!("Comb mask frame {}", src.desc());

        let color_planes = self.format.color_plane_count().min(3);
        for index in 0..color_planes {
            match self.plane_mode(index) {
                PlaneMode::Process => {
                    self.mask_plane_unchecked(src.plane(index), dst.plane_mut(index))
                }
                PlaneMode::Copy => dst.plane_mut(index).copy_from(src.plane(index)),
                PlaneMode::Untouched => {}
            }
        }

        if let Some(alpha) = self.format.alpha_plane() {
            dst.plane_mut(alpha).copy_from(src.plane(alpha));
        }

        Ok(())
    }

    /// Computes the mask of a single plane regardless of the plane modes.
    pub fn mask_plane(&self, src: &Plane, dst: &mut Plane) -> Result<()> {
        if src.desc().format != self.format.sample {
            return Err(Error::FrameMismatch(format!(
                "plane {} does not hold {} samples",
                src.desc(),
                self.format.sample
            )));
        }
        if !src.desc().same_geometry(dst.desc()) {
            return Err(Error::FrameMismatch(format!(
                "destination plane {} differs from source plane {}",
                dst.desc(),
                src.desc()
            )));
        }

        self.mask_plane_unchecked(src, dst);

        Ok(())
    }

    fn mask_plane_unchecked(&self, src: &Plane, dst: &mut Plane) {
        match &self.domain {
            NumericDomain::U8(th) => kernel::mask_plane(src, dst, self.kernels.u8_row, th),
            NumericDomain::U16 { thresholds, .. } => {
                kernel::mask_plane(src, dst, self.kernels.u16_row, thresholds)
            }
            NumericDomain::F32(th) => kernel::mask_plane(src, dst, self.kernels.f32_row, th),
        }
    }

    fn check_frame(&self, frame: &Frame, role: &str) -> Result<()> {
        if *frame.format() != self.format {
            return Err(Error::FrameMismatch(format!(
                "{} frame is {}, filter expects {}",
                role,
                frame.format(),
                self.format
            )));
        }
        Ok(())
    }
}
