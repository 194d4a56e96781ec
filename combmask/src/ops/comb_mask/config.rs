use serde::{Deserialize, Serialize};

use crate::common::error::{Error, Result};
use crate::ops::CapabilityRequest;

/// What the filter does with one color plane.
///
/// Serialized as the host integer code: 1 = untouched, 2 = copy, 3 = process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum PlaneMode {
    /// The output plane is not written.
    Untouched = 1,
    /// The source plane is copied unchanged.
    Copy = 2,
    /// The comb mask of the source plane is computed.
    Process = 3,
}

impl TryFrom<i32> for PlaneMode {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(PlaneMode::Untouched),
            2 => Ok(PlaneMode::Copy),
            3 => Ok(PlaneMode::Process),
            _ => Err(Error::PlaneModeOutOfRange(value)),
        }
    }
}

impl From<PlaneMode> for i32 {
    fn from(value: PlaneMode) -> Self {
        value as i32
    }
}

/// Scheduling class the filter declares to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadSafety {
    /// One instance may serve frame requests from any number of threads.
    #[default]
    Concurrent,
    /// The host should create one instance per worker thread.
    PerInstance,
}

/// Validated `(low, high)` threshold pair in 8-bit units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThresholdPair {
    low: u8,
    high: u8,
}

impl ThresholdPair {
    pub fn new(low: i32, high: i32) -> Result<Self> {
        let low = Self::check_range("first", low)?;
        let high = Self::check_range("second", high)?;

        if low > high {
            return Err(Error::ThresholdOrder {
                low: low as i32,
                high: high as i32,
            });
        }

        Ok(Self { low, high })
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    fn check_range(name: &'static str, value: i32) -> Result<u8> {
        u8::try_from(value).map_err(|_| Error::ThresholdOutOfRange { name, value })
    }
}

/// Construction options of the comb mask filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CombMaskConfig {
    /// Products below this value map to 0 (8-bit units).
    pub low_threshold: i32,
    /// Products above this value map to the peak (8-bit units).
    pub high_threshold: i32,
    pub luma: PlaneMode,
    pub chroma_u: PlaneMode,
    pub chroma_v: PlaneMode,
    pub capability: CapabilityRequest,
    pub thread_safety: ThreadSafety,
}

impl Default for CombMaskConfig {
    fn default() -> Self {
        Self {
            low_threshold: 30,
            high_threshold: 30,
            luma: PlaneMode::Process,
            chroma_u: PlaneMode::Untouched,
            chroma_v: PlaneMode::Untouched,
            capability: CapabilityRequest::Auto,
            thread_safety: ThreadSafety::Concurrent,
        }
    }
}

impl CombMaskConfig {
    /// Builds a config from the raw integer arguments a host passes:
    /// thresholds, per-plane mode codes and the `opt` backend code.
    pub fn from_args(
        low_threshold: i32,
        high_threshold: i32,
        luma: i32,
        chroma_u: i32,
        chroma_v: i32,
        opt: i32,
    ) -> Result<Self> {
        let config = Self {
            low_threshold,
            high_threshold,
            luma: PlaneMode::try_from(luma)?,
            chroma_u: PlaneMode::try_from(chroma_u)?,
            chroma_v: PlaneMode::try_from(chroma_v)?,
            capability: CapabilityRequest::from_opt(opt)?,
            thread_safety: ThreadSafety::default(),
        };
        config.validate()?;

        Ok(config)
    }

    /// Builder method to set both thresholds.
    pub fn thresholds(mut self, low: i32, high: i32) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    /// Builder method to set the three plane modes.
    pub fn plane_modes(mut self, luma: PlaneMode, chroma_u: PlaneMode, chroma_v: PlaneMode) -> Self {
        self.luma = luma;
        self.chroma_u = chroma_u;
        self.chroma_v = chroma_v;
        self
    }

    /// Builder method to set the backend request.
    pub fn capability(mut self, capability: CapabilityRequest) -> Self {
        self.capability = capability;
        self
    }

    /// Builder method to set the declared thread-safety class.
    pub fn thread_safety(mut self, thread_safety: ThreadSafety) -> Self {
        self.thread_safety = thread_safety;
        self
    }

    pub fn plane_modes_array(&self) -> [PlaneMode; 3] {
        [self.luma, self.chroma_u, self.chroma_v]
    }

    /// Checks the thresholds and returns them as a validated pair.
    pub fn validate(&self) -> Result<ThresholdPair> {
        ThresholdPair::new(self.low_threshold, self.high_threshold)
    }
}
