use crate::common::error::{Error, Result};

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum SampleSize {
    #[default]
    _8bit = 1,
    _16bit = 2,
    _32bit = 4,
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum SampleType {
    #[default]
    UInt,
    Float,
}

/// Storage and numeric interpretation of one plane sample.
///
/// `bit_depth` is the number of significant bits. Integer depths 10..16 are
/// stored in a 16-bit container; floats are normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, Hash, Default, PartialEq, Eq)]
pub struct SampleFormat {
    pub sample_size: SampleSize,
    pub sample_type: SampleType,
    pub bit_depth: u8,
}

impl SampleSize {
    pub fn byte_count(&self) -> u8 {
        *self as u8
    }
}

impl SampleFormat {
    pub const U8: SampleFormat = SampleFormat::uint(SampleSize::_8bit, 8);
    pub const U10: SampleFormat = SampleFormat::uint(SampleSize::_16bit, 10);
    pub const U12: SampleFormat = SampleFormat::uint(SampleSize::_16bit, 12);
    pub const U14: SampleFormat = SampleFormat::uint(SampleSize::_16bit, 14);
    pub const U16: SampleFormat = SampleFormat::uint(SampleSize::_16bit, 16);
    pub const F32: SampleFormat = SampleFormat {
        sample_size: SampleSize::_32bit,
        sample_type: SampleType::Float,
        bit_depth: 32,
    };

    const fn uint(sample_size: SampleSize, bit_depth: u8) -> SampleFormat {
        SampleFormat {
            sample_size,
            sample_type: SampleType::UInt,
            bit_depth,
        }
    }

    pub fn byte_count(&self) -> u8 {
        self.sample_size.byte_count()
    }

    /// Maximum representable integer sample value. Floats report 1.
    pub fn peak(&self) -> u32 {
        match self.sample_type {
            SampleType::UInt => ((1u64 << self.bit_depth.min(32)) - 1) as u32,
            SampleType::Float => 1,
        }
    }

    pub fn is_supported(&self) -> bool {
        ALL_SAMPLE_FORMATS.contains(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_supported() {
            return Ok(());
        }

        let storage_ok = matches!(
            (self.sample_type, self.sample_size),
            (SampleType::UInt, SampleSize::_8bit)
                | (SampleType::UInt, SampleSize::_16bit)
                | (SampleType::Float, SampleSize::_32bit)
        );
        if !storage_ok {
            return Err(Error::UnsupportedFormat(format!(
                "{}-byte {} samples",
                self.byte_count(),
                self.sample_type
            )));
        }

        Err(Error::UnsupportedBitDepth {
            bits: self.bit_depth,
            sample_type: self.sample_type.to_string(),
        })
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleType::UInt => write!(f, "integer"),
            SampleType::Float => write!(f, "float"),
        }
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sample_type {
            SampleType::UInt => write!(f, "u{}", self.bit_depth),
            SampleType::Float => write!(f, "f{}", self.bit_depth),
        }
    }
}

/// All sample formats the mask kernel accepts.
pub const ALL_SAMPLE_FORMATS: &[SampleFormat] = &[
    SampleFormat::U8,
    SampleFormat::U10,
    SampleFormat::U12,
    SampleFormat::U14,
    SampleFormat::U16,
    SampleFormat::F32,
];

/// Sample element stored in a plane row.
pub trait Sample: bytemuck::Pod + Send + Sync + std::fmt::Debug {
    const SIZE: SampleSize;
}

impl Sample for u8 {
    const SIZE: SampleSize = SampleSize::_8bit;
}

impl Sample for u16 {
    const SIZE: SampleSize = SampleSize::_16bit;
}

impl Sample for f32 {
    const SIZE: SampleSize = SampleSize::_32bit;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_follow_bit_depth() {
        assert_eq!(SampleFormat::U8.peak(), 255);
        assert_eq!(SampleFormat::U10.peak(), 1023);
        assert_eq!(SampleFormat::U12.peak(), 4095);
        assert_eq!(SampleFormat::U14.peak(), 16383);
        assert_eq!(SampleFormat::U16.peak(), 65535);
        assert_eq!(SampleFormat::F32.peak(), 1);
    }

    #[test]
    fn all_formats_validate() {
        for format in ALL_SAMPLE_FORMATS {
            format.validate().unwrap();
        }
    }

    #[test]
    fn odd_bit_depths_are_rejected() {
        for bits in [9u8, 11, 13, 15] {
            let format = SampleFormat {
                sample_size: SampleSize::_16bit,
                sample_type: SampleType::UInt,
                bit_depth: bits,
            };
            assert!(matches!(
                format.validate(),
                Err(Error::UnsupportedBitDepth { bits: b, .. }) if b == bits
            ));
        }
    }

    #[test]
    fn half_float_and_u32_storage_are_rejected() {
        let half = SampleFormat {
            sample_size: SampleSize::_16bit,
            sample_type: SampleType::Float,
            bit_depth: 16,
        };
        assert!(matches!(half.validate(), Err(Error::UnsupportedFormat(_))));

        let u32_format = SampleFormat {
            sample_size: SampleSize::_32bit,
            sample_type: SampleType::UInt,
            bit_depth: 32,
        };
        assert!(matches!(
            u32_format.validate(),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn display_names() {
        assert_eq!(SampleFormat::U8.to_string(), "u8");
        assert_eq!(SampleFormat::U12.to_string(), "u12");
        assert_eq!(SampleFormat::F32.to_string(), "f32");
    }
}
