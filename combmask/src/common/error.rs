use crate::ops::Capability;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported frame format: {0}")]
    UnsupportedFormat(String),
    #[error("Unsupported bit depth: {bits} bits per {sample_type} sample")]
    UnsupportedBitDepth { bits: u8, sample_type: String },
    #[error("Plane mode must be between 1..3, got {0}")]
    PlaneModeOutOfRange(i32),
    #[error("{name} threshold must be in the range 0..255, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: i32 },
    #[error("Low threshold {low} must not exceed high threshold {high}")]
    ThresholdOrder { low: i32, high: i32 },
    #[error("Capability level must be between -1..3, got {0}")]
    CapabilityOutOfRange(i32),
    #[error("Requested {requested} backend but the CPU only supports up to {detected}")]
    UnsupportedCapability {
        requested: Capability,
        detected: Capability,
    },
    #[error("Invalid plane: {0}")]
    InvalidPlane(String),
    #[error("Frame does not match the filter format: {0}")]
    FrameMismatch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
