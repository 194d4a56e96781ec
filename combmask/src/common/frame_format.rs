use crate::common::error::{Error, Result};
use crate::common::sample_format::SampleFormat;

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
pub enum ColorFamily {
    Gray,
    #[default]
    Yuv,
    Rgb,
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
pub enum Layout {
    /// One single-channel plane per component.
    #[default]
    Planar,
    /// All components interleaved in a single plane.
    Packed,
}

/// Video format description shared by every frame of a clip.
#[derive(Clone, Copy, Debug, Hash, Default, PartialEq, Eq)]
pub struct FrameFormat {
    pub family: ColorFamily,
    pub layout: Layout,
    pub sample: SampleFormat,
    /// Horizontal chroma subsampling as a power of two.
    pub subsampling_w: u8,
    /// Vertical chroma subsampling as a power of two.
    pub subsampling_h: u8,
    pub has_alpha: bool,
}

impl FrameFormat {
    pub const fn yuv(sample: SampleFormat, subsampling_w: u8, subsampling_h: u8) -> Self {
        Self {
            family: ColorFamily::Yuv,
            layout: Layout::Planar,
            sample,
            subsampling_w,
            subsampling_h,
            has_alpha: false,
        }
    }

    pub const fn yuv420(sample: SampleFormat) -> Self {
        Self::yuv(sample, 1, 1)
    }

    pub const fn yuv444(sample: SampleFormat) -> Self {
        Self::yuv(sample, 0, 0)
    }

    pub const fn gray(sample: SampleFormat) -> Self {
        Self {
            family: ColorFamily::Gray,
            layout: Layout::Planar,
            sample,
            subsampling_w: 0,
            subsampling_h: 0,
            has_alpha: false,
        }
    }

    pub const fn with_alpha(self) -> Self {
        Self {
            has_alpha: true,
            ..self
        }
    }

    /// Number of color planes, alpha excluded.
    pub fn color_plane_count(&self) -> usize {
        match (self.layout, self.family) {
            (Layout::Packed, _) => 1,
            (Layout::Planar, ColorFamily::Gray) => 1,
            (Layout::Planar, ColorFamily::Yuv | ColorFamily::Rgb) => 3,
        }
    }

    /// Number of planes including alpha.
    pub fn plane_count(&self) -> usize {
        self.color_plane_count() + usize::from(self.has_alpha && self.layout == Layout::Planar)
    }

    /// Index of the alpha plane, if the format carries one.
    pub fn alpha_plane(&self) -> Option<usize> {
        (self.has_alpha && self.layout == Layout::Planar).then(|| self.color_plane_count())
    }

    /// Dimensions of plane `index` for a frame of `width` x `height` samples.
    pub fn plane_dimensions(&self, index: usize, width: u32, height: u32) -> (u32, u32) {
        let is_chroma =
            self.family == ColorFamily::Yuv && index > 0 && index < self.color_plane_count();
        if is_chroma {
            (width >> self.subsampling_w, height >> self.subsampling_h)
        } else {
            (width, height)
        }
    }

    /// Checks that frames of this format can be fed to the mask filter:
    /// planar, non-RGB, and a supported sample format.
    pub fn validate(&self) -> Result<()> {
        if self.family == ColorFamily::Rgb || self.layout != Layout::Planar {
            return Err(Error::UnsupportedFormat(format!(
                "clip must be in YUV planar format, got {}",
                self
            )));
        }

        self.sample.validate()
    }
}

impl std::fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let family = match self.family {
            ColorFamily::Gray => "Gray",
            ColorFamily::Yuv => "YUV",
            ColorFamily::Rgb => "RGB",
        };
        let layout = match self.layout {
            Layout::Planar => "planar",
            Layout::Packed => "packed",
        };
        let alpha = if self.has_alpha { "+A" } else { "" };

        write!(f, "{}{} {} {}", family, alpha, layout, self.sample)
    }
}
