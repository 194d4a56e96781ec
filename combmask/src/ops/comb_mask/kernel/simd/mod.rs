#[cfg(target_arch = "x86_64")]
pub(crate) mod avx;
#[cfg(target_arch = "x86_64")]
pub(crate) mod avx512;
#[cfg(target_arch = "x86_64")]
pub(crate) mod sse;


use super::RowKernels;
use crate::ops::Capability;

/// Vector kernel table for `capability`.
///
/// The running CPU is checked here even when the caller already resolved the
/// tier, since the detected tier can be supplied from outside.
pub(crate) fn row_kernels(capability: Capability) -> Option<RowKernels> {
    #[cfg(target_arch = "x86_64")]
    {
        use common::cpu_features;

        match capability {
            Capability::Sse2 if cpu_features::has_sse2() => Some(sse::row_kernels()),
            Capability::Avx2 if cpu_features::has_avx2() => Some(avx::row_kernels()),
            Capability::Avx512 if cpu_features::has_avx512bw() && cpu_features::has_avx2() => {
                Some(avx512::row_kernels())
            }
            _ => None,
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        let _ = capability;
        None
    }
}
