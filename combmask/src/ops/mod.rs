mod backend_selection;
pub(crate) mod comb_mask;

pub use backend_selection::{select_backend, Capability, CapabilityRequest};
pub use comb_mask::{
    CombMask, CombMaskConfig, FloatThresholds, IntThresholds, NumericDomain, PlaneMode,
    ThreadSafety, ThresholdPair,
};
