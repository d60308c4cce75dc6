//! Runtime CPU capability detection
//!
//! A [`Capabilities`] value is always derived from what the CPU actually
//! reports. It can be narrowed (to force a backend off) but never widened,
//! so holding one is proof that the native backends it enables may run.

use crate::tier::Tier;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
cpufeatures::new!(cpuid_sse2, "sse2");
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
cpufeatures::new!(cpuid_avx2, "avx2");
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
cpufeatures::new!(cpuid_avx512, "avx512f");

/// Vector instruction support of the running CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    sse2: bool,
    avx2: bool,
    avx512f: bool,
}

impl Capabilities {
    /// Query the CPU. The result is cached by `cpufeatures` after the first call.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub fn detect() -> Self {
        Self {
            sse2: cpuid_sse2::get(),
            avx2: cpuid_avx2::get(),
            avx512f: cpuid_avx512::get(),
        }
    }

    /// Query the CPU. Non-x86 targets have no native backends.
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    pub fn detect() -> Self {
        Self::scalar_only()
    }

    /// No vector support at all; every SIMD tier runs on portable lanes.
    pub const fn scalar_only() -> Self {
        Self {
            sse2: false,
            avx2: false,
            avx512f: false,
        }
    }

    /// Drop every capability above `tier`.
    pub const fn limit_to(self, tier: Tier) -> Self {
        Self {
            sse2: self.sse2 && (tier as u8) >= (Tier::Width128 as u8),
            avx2: self.avx2 && (tier as u8) >= (Tier::Width256 as u8),
            avx512f: self.avx512f && (tier as u8) >= (Tier::Width512 as u8),
        }
    }

    #[inline]
    pub const fn supports_width128(&self) -> bool {
        self.sse2
    }

    #[inline]
    pub const fn supports_width256(&self) -> bool {
        self.avx2
    }

    #[inline]
    pub const fn supports_width512(&self) -> bool {
        self.avx512f
    }

    /// Widest tier with native support.
    pub const fn max_tier(&self) -> Tier {
        if self.avx512f {
            Tier::Width512
        } else if self.avx2 {
            Tier::Width256
        } else if self.sse2 {
            Tier::Width128
        } else {
            Tier::Scalar
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}
