use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use common::cpu_features;

use crate::common::error::{Error, Result};

/// Vector instruction tier a kernel implementation targets.
///
/// Ordered by register width, so `a <= b` means `b` can run everything `a` can.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    #[strum(serialize = "scalar")]
    Scalar,
    #[strum(serialize = "SSE2")]
    Sse2,
    #[strum(serialize = "AVX2")]
    Avx2,
    #[strum(serialize = "AVX-512")]
    Avx512,
}

impl Capability {
    /// Highest tier the running CPU supports.
    pub fn detect() -> Capability {
        let features = cpu_features::get();

        if features.avx512f && features.avx512bw && features.avx2 {
            Capability::Avx512
        } else if features.avx2 {
            Capability::Avx2
        } else if features.sse2 {
            Capability::Sse2
        } else {
            Capability::Scalar
        }
    }

    /// Number of `sample_bytes`-wide samples one vector register holds.
    pub fn lanes(&self, sample_bytes: usize) -> usize {
        match self {
            Capability::Scalar => 1,
            Capability::Sse2 => 16 / sample_bytes,
            Capability::Avx2 => 32 / sample_bytes,
            Capability::Avx512 => 64 / sample_bytes,
        }
    }
}

/// Backend selection requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityRequest {
    /// Use the best tier the CPU supports.
    #[default]
    Auto,
    Scalar,
    Sse2,
    Avx2,
    Avx512,
}

impl CapabilityRequest {
    /// Decodes the host's integer `opt` argument: -1 = auto, 0 = scalar,
    /// 1 = SSE2, 2 = AVX2, 3 = AVX-512.
    pub fn from_opt(opt: i32) -> Result<CapabilityRequest> {
        match opt {
            -1 => Ok(CapabilityRequest::Auto),
            0 => Ok(CapabilityRequest::Scalar),
            1 => Ok(CapabilityRequest::Sse2),
            2 => Ok(CapabilityRequest::Avx2),
            3 => Ok(CapabilityRequest::Avx512),
            _ => Err(Error::CapabilityOutOfRange(opt)),
        }
    }

    /// The explicitly requested tier, or `None` for auto.
    pub fn explicit(&self) -> Option<Capability> {
        match self {
            CapabilityRequest::Auto => None,
            CapabilityRequest::Scalar => Some(Capability::Scalar),
            CapabilityRequest::Sse2 => Some(Capability::Sse2),
            CapabilityRequest::Avx2 => Some(Capability::Avx2),
            CapabilityRequest::Avx512 => Some(Capability::Avx512),
        }
    }
}

impl From<Capability> for CapabilityRequest {
    fn from(value: Capability) -> Self {
        match value {
            Capability::Scalar => CapabilityRequest::Scalar,
            Capability::Sse2 => CapabilityRequest::Sse2,
            Capability::Avx2 => CapabilityRequest::Avx2,
            Capability::Avx512 => CapabilityRequest::Avx512,
        }
    }
}

/// Resolves the backend tier for a filter instance.
///
/// The logic:
/// 1. `Auto` resolves to the detected tier
/// 2. An explicit tier at or below the detected tier is used as is
/// 3. An explicit tier above the detected tier is a configuration error;
///    there is no silent downgrade
///
/// # Arguments
/// * `request` - The user's backend request
/// * `detected` - The highest tier the CPU supports
pub fn select_backend(request: CapabilityRequest, detected: Capability) -> Result<Capability> {
    match request.explicit() {
        None => Ok(detected),
        Some(requested) if requested <= detected => Ok(requested),
        Some(requested) => Err(Error::UnsupportedCapability {
            requested,
            detected,
        }),
    }
}
