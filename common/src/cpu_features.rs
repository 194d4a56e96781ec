//! CPU feature detection for runtime SIMD dispatch.
//!
//! Detection runs once on first use and is cached for the lifetime of the
//! process. Use these functions instead of calling `is_x86_feature_detected!`
//! directly to avoid repeated CPUID calls.

use std::sync::OnceLock;

/// CPU feature flags detected once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct X86Features {
    pub sse2: bool,
    pub avx2: bool,
    pub avx512f: bool,
    pub avx512bw: bool,
}

static FEATURES: OnceLock<X86Features> = OnceLock::new();

/// Get cached CPU features (detected once on first call).
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| X86Features {
        sse2: is_x86_feature_detected!("sse2"),
        avx2: is_x86_feature_detected!("avx2"),
        avx512f: is_x86_feature_detected!("avx512f"),
        avx512bw: is_x86_feature_detected!("avx512bw"),
    })
}

/// Get cached CPU features - stub for non-x86 platforms.
#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(X86Features::default)
}

/// Check if SSE2 is available.
#[inline]
pub fn has_sse2() -> bool {
    get().sse2
}

/// Check if AVX2 is available.
#[inline]
pub fn has_avx2() -> bool {
    get().avx2
}

/// Check if the AVX-512 foundation and byte/word extensions are both available.
#[inline]
pub fn has_avx512bw() -> bool {
    let f = get();
    f.avx512f && f.avx512bw
}
