// Sample and frame formats
pub use crate::common::{
    ColorFamily, FrameFormat, Layout, Sample, SampleFormat, SampleSize, SampleType,
    ALL_SAMPLE_FORMATS,
};

// Error handling
pub use crate::common::{Error, Result};

// Frames and planes
pub use crate::frame::{Frame, FrameDesc, Plane, PlaneDesc, ALIGNMENT};

// Comparison
pub use crate::common::{max_plane_diff, planes_equal};

// Filter
pub use crate::ops::{
    select_backend, Capability, CapabilityRequest, CombMask, CombMaskConfig, FloatThresholds,
    IntThresholds, NumericDomain, PlaneMode, ThreadSafety, ThresholdPair,
};
