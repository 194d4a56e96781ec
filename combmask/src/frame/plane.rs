use aligned_vec::{AVec, ConstAlign};

use super::stride::{add_stride_padding, align_stride, strip_stride_padding, zeroed_storage};
use super::ALIGNMENT;
use crate::common::error::{Error, Result};
use crate::common::sample_format::{Sample, SampleFormat};

/// Geometry of one plane buffer.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct PlaneDesc {
    /// Width in samples.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
    /// Distance in bytes between the starts of consecutive rows.
    pub stride: usize,
    pub format: SampleFormat,
}

impl PlaneDesc {
    /// Descriptor with the default aligned stride.
    pub fn new(width: u32, height: u32, format: SampleFormat) -> Self {
        let row_bytes = width as usize * format.byte_count() as usize;

        Self {
            width,
            height,
            stride: align_stride(row_bytes),
            format,
        }
    }

    /// Number of bytes per row without padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.format.byte_count() as usize
    }

    pub fn size_in_bytes(&self) -> usize {
        self.height as usize * self.stride
    }

    /// Returns true if stride equals row bytes (no padding).
    pub fn is_packed(&self) -> bool {
        self.stride == self.row_bytes()
    }

    /// Same width, height and sample format; strides may differ.
    pub fn same_geometry(&self, other: &PlaneDesc) -> bool {
        self.width == other.width && self.height == other.height && self.format == other.format
    }

    fn validate(&self) -> Result<()> {
        self.format.validate()?;

        if self.stride < self.row_bytes() {
            return Err(Error::InvalidPlane(format!(
                "stride {} is smaller than row size {}",
                self.stride,
                self.row_bytes()
            )));
        }
        if !self
            .stride
            .is_multiple_of(self.format.byte_count() as usize)
        {
            return Err(Error::InvalidPlane(format!(
                "stride {} is not a multiple of the {}-byte sample size",
                self.stride,
                self.format.byte_count()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for PlaneDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} {} (stride {})",
            self.width, self.height, self.format, self.stride
        )
    }
}

/// One channel's 2D sample grid.
#[derive(Clone, Debug)]
pub struct Plane {
    desc: PlaneDesc,
    bytes: AVec<u8, ConstAlign<ALIGNMENT>>,
}

impl Plane {
    /// Returns the plane descriptor.
    pub fn desc(&self) -> &PlaneDesc {
        &self.desc
    }

    /// Returns all plane bytes, row padding included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns all plane bytes mutably, row padding included.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Allocates a zero-filled plane with the given descriptor.
    pub fn new_zeroed(desc: PlaneDesc) -> Result<Plane> {
        desc.validate()?;

        Ok(Plane {
            desc,
            bytes: zeroed_storage(desc.stride, desc.height as usize),
        })
    }

    /// Allocates a zero-filled plane with a custom row stride in bytes.
    ///
    /// The stride must cover a full row and be a multiple of the sample size.
    pub fn with_stride(desc: PlaneDesc, stride: usize) -> Result<Plane> {
        Self::new_zeroed(PlaneDesc { stride, ..desc })
    }

    /// Builds a plane from tightly packed samples, using the descriptor's stride.
    pub fn from_samples<T: Sample>(desc: PlaneDesc, samples: &[T]) -> Result<Plane> {
        desc.validate()?;
        Self::check_sample_type::<T>(&desc)?;

        let expected = desc.width as usize * desc.height as usize;
        if samples.len() != expected {
            return Err(Error::InvalidPlane(format!(
                "sample count {} does not match {}x{}",
                samples.len(),
                desc.width,
                desc.height
            )));
        }

        let bytes = add_stride_padding(
            bytemuck::cast_slice(samples),
            desc.row_bytes(),
            desc.height as usize,
            desc.stride,
        );

        Ok(Plane { desc, bytes })
    }

    /// Returns the samples without stride padding.
    pub fn to_samples<T: Sample>(&self) -> Vec<T> {
        let packed = strip_stride_padding(
            &self.bytes,
            self.desc.row_bytes(),
            self.desc.height as usize,
            self.desc.stride,
        );
        bytemuck::pod_collect_to_vec(&packed)
    }

    /// Row `y` as `width` samples.
    ///
    /// # Panics
    /// Panics if `y` is out of range or `T` does not match the sample size.
    pub fn row<T: Sample>(&self, y: usize) -> &[T] {
        let start = y * self.desc.stride;
        bytemuck::cast_slice(&self.bytes[start..start + self.desc.row_bytes()])
    }

    /// Mutable row `y` as `width` samples.
    ///
    /// # Panics
    /// Panics if `y` is out of range or `T` does not match the sample size.
    pub fn row_mut<T: Sample>(&mut self, y: usize) -> &mut [T] {
        let start = y * self.desc.stride;
        let row_bytes = self.desc.row_bytes();
        bytemuck::cast_slice_mut(&mut self.bytes[start..start + row_bytes])
    }

    /// Row `y` as raw bytes, padding excluded.
    pub fn row_bytes(&self, y: usize) -> &[u8] {
        let start = y * self.desc.stride;
        &self.bytes[start..start + self.desc.row_bytes()]
    }

    /// Mutable row `y` as raw bytes, padding excluded.
    pub fn row_bytes_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.desc.stride;
        let row_bytes = self.desc.row_bytes();
        &mut self.bytes[start..start + row_bytes]
    }

    /// Copies every row of `src` into this plane. Strides may differ.
    ///
    /// # Panics
    /// Panics if the planes have different geometry.
    pub fn copy_from(&mut self, src: &Plane) {
        assert!(
            self.desc.same_geometry(&src.desc),
            "plane geometry mismatch: {} vs {}",
            self.desc,
            src.desc
        );

        if self.desc.stride == src.desc.stride {
            self.bytes.copy_from_slice(&src.bytes);
            return;
        }

        for y in 0..self.desc.height as usize {
            self.row_bytes_mut(y).copy_from_slice(src.row_bytes(y));
        }
    }

    fn check_sample_type<T: Sample>(desc: &PlaneDesc) -> Result<()> {
        if T::SIZE != desc.format.sample_size {
            return Err(Error::InvalidPlane(format!(
                "{}-byte samples do not match {} plane",
                T::SIZE.byte_count(),
                desc.format
            )));
        }
        Ok(())
    }
}
