mod plane;
mod stride;

#[cfg(test)]
mod tests;

pub use plane::{Plane, PlaneDesc};

use crate::common::error::{Error, Result};
use crate::common::frame_format::FrameFormat;

/// Byte alignment of plane storage and default strides. Wide enough for
/// 512-bit vector loads.
pub const ALIGNMENT: usize = 64;

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct FrameDesc {
    /// Luma width in samples.
    pub width: u32,
    /// Luma height in rows.
    pub height: u32,
    pub format: FrameFormat,
}

impl FrameDesc {
    pub fn new(width: u32, height: u32, format: FrameFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }

    /// Descriptor of plane `index` with the default aligned stride.
    pub fn plane_desc(&self, index: usize) -> PlaneDesc {
        let (width, height) = self.format.plane_dimensions(index, self.width, self.height);
        PlaneDesc::new(width, height, self.format.sample)
    }
}

impl std::fmt::Display for FrameDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}

/// An ordered set of up to four planes sharing one sample format.
#[derive(Clone, Debug)]
pub struct Frame {
    desc: FrameDesc,
    planes: Vec<Plane>,
}

impl Frame {
    /// Allocates a frame whose planes are zero-filled.
    ///
    /// Only planar layouts can be allocated.
    pub fn new_zeroed(desc: FrameDesc) -> Result<Frame> {
        Self::check_planar(&desc)?;

        let planes = (0..desc.format.plane_count())
            .map(|i| Plane::new_zeroed(desc.plane_desc(i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Frame { desc, planes })
    }

    /// Assembles a frame from existing planes, checking their geometry
    /// against the frame descriptor. Plane strides are free.
    pub fn from_planes(desc: FrameDesc, planes: Vec<Plane>) -> Result<Frame> {
        Self::check_planar(&desc)?;

        if planes.len() != desc.format.plane_count() {
            return Err(Error::InvalidPlane(format!(
                "{} expects {} planes, got {}",
                desc.format,
                desc.format.plane_count(),
                planes.len()
            )));
        }

        for (i, plane) in planes.iter().enumerate() {
            let expected = desc.plane_desc(i);
            if !plane.desc().same_geometry(&expected) {
                return Err(Error::InvalidPlane(format!(
                    "plane {} is {}, expected {}",
                    i,
                    plane.desc(),
                    expected
                )));
            }
        }

        Ok(Frame { desc, planes })
    }

    pub fn desc(&self) -> &FrameDesc {
        &self.desc
    }

    pub fn format(&self) -> &FrameFormat {
        &self.desc.format
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    pub fn plane_mut(&mut self, index: usize) -> &mut Plane {
        &mut self.planes[index]
    }

    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }

    fn check_planar(desc: &FrameDesc) -> Result<()> {
        if desc.format.layout != crate::common::frame_format::Layout::Planar {
            return Err(Error::UnsupportedFormat(format!(
                "cannot allocate {} frame",
                desc.format
            )));
        }
        Ok(())
    }
}
