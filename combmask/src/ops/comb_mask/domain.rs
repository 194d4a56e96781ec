use crate::common::error::{Error, Result};
use crate::common::sample_format::{SampleFormat, SampleSize, SampleType};
use crate::ops::comb_mask::config::ThresholdPair;

/// Thresholds of an integer domain, rescaled to the sample bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntThresholds {
    pub low: i32,
    pub high: i32,
    /// Right shift applied to the raw product before thresholding.
    pub shift: u32,
    /// Value written when the product exceeds `high`.
    pub peak: i32,
}

/// Thresholds of the normalized float domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatThresholds {
    pub low: f32,
    pub high: f32,
}

/// Sample interpretation the kernel runs in, with the thresholds it compares against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericDomain {
    U8(IntThresholds),
    U16 { bits: u8, thresholds: IntThresholds },
    F32(FloatThresholds),
}

impl NumericDomain {
    pub fn new(format: SampleFormat, thresholds: ThresholdPair) -> Result<Self> {
        format.validate()?;

        let low = thresholds.low() as i32;
        let high = thresholds.high() as i32;

        let domain = match (format.sample_type, format.sample_size) {
            (SampleType::UInt, SampleSize::_8bit) => NumericDomain::U8(IntThresholds {
                low,
                high,
                shift: 0,
                peak: 255,
            }),
            (SampleType::UInt, SampleSize::_16bit) => {
                let bits = format.bit_depth;
                let peak = format.peak() as i32;
                // 8-bit thresholds scaled to the full range, rounded: 4/16/64/257
                let scale = (peak as f64 / 255.0 + 0.5) as i32;

                NumericDomain::U16 {
                    bits,
                    thresholds: IntThresholds {
                        low: low * scale,
                        high: high * scale,
                        shift: (bits - 8) as u32,
                        peak,
                    },
                }
            }
            (SampleType::Float, SampleSize::_32bit) => NumericDomain::F32(FloatThresholds {
                low: low as f32 / 255.0,
                high: high as f32 / 255.0,
            }),
            _ => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} samples have no numeric domain",
                    format
                )));
            }
        };

        Ok(domain)
    }

    pub fn sample_size(&self) -> SampleSize {
        match self {
            NumericDomain::U8(_) => SampleSize::_8bit,
            NumericDomain::U16 { .. } => SampleSize::_16bit,
            NumericDomain::F32(_) => SampleSize::_32bit,
        }
    }
}

impl std::fmt::Display for NumericDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericDomain::U8(th) => write!(f, "u8 [{}, {}]", th.low, th.high),
            NumericDomain::U16 { bits, thresholds } => write!(
                f,
                "u{} [{}, {}] >> {}",
                bits, thresholds.low, thresholds.high, thresholds.shift
            ),
            NumericDomain::F32(th) => write!(f, "f32 [{}, {}]", th.low, th.high),
        }
    }
}
