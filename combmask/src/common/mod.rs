pub(crate) mod error;
pub(crate) mod frame_format;
pub(crate) mod plane_diff;
pub(crate) mod sample_format;
#[cfg(test)]
pub(crate) mod test_utils;

// Public API
pub use error::{Error, Result};
pub use frame_format::{ColorFamily, FrameFormat, Layout};
pub use plane_diff::{max_plane_diff, planes_equal};
pub use sample_format::{Sample, SampleFormat, SampleSize, SampleType, ALL_SAMPLE_FORMATS};
