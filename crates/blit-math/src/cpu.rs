//! Processor capability probe.
//!
//! Queries the executing CPU once per process for the vector instruction
//! extensions the blend engine can use. The result is immutable after the
//! first call and safe to read from any thread.
//!
//! ```rust
//! use blit_math::cpu_features;
//!
//! let features = cpu_features();
//! println!("{features}");
//! ```

use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Vector extensions detected on the executing processor.
///
/// Unsupported extensions (or ones that do not exist on the target
/// architecture) simply read `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CpuFeatures {
    /// x86 MMX
    pub mmx: bool,
    /// x86 SSE
    pub sse: bool,
    /// x86 SSE2 (128-bit integer SIMD)
    pub sse2: bool,
    /// x86 SSE3
    pub sse3: bool,
    /// x86 SSE4.1
    pub sse41: bool,
    /// x86 AVX2 (256-bit integer SIMD)
    pub avx2: bool,
    /// ARM NEON (128-bit integer SIMD)
    pub neon: bool,
}

impl CpuFeatures {
    /// A capability set with every extension absent.
    pub const NONE: CpuFeatures = CpuFeatures {
        mmx: false,
        sse: false,
        sse2: false,
        sse3: false,
        sse41: false,
        avx2: false,
        neon: false,
    };

    /// Returns `true` if a 128-bit integer SIMD extension is available.
    ///
    /// This is the minimum the vector blend kernel needs to beat the
    /// scalar one.
    #[inline]
    pub fn has_vector(&self) -> bool {
        self.sse2 || self.neon
    }

    /// Names of the extensions that are present.
    pub fn names(&self) -> Vec<&'static str> {
        let table = [
            (self.mmx, "mmx"),
            (self.sse, "sse"),
            (self.sse2, "sse2"),
            (self.sse3, "sse3"),
            (self.sse41, "sse4.1"),
            (self.avx2, "avx2"),
            (self.neon, "neon"),
        ];
        table
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for CpuFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            f.write_str("scalar")
        } else {
            f.write_str(&names.join(" "))
        }
    }
}

/// Queries the processor directly. Prefer [`cpu_features`], which caches.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub fn probe() -> CpuFeatures {
    CpuFeatures {
        mmx: is_x86_feature_detected!("mmx"),
        sse: is_x86_feature_detected!("sse"),
        sse2: is_x86_feature_detected!("sse2"),
        sse3: is_x86_feature_detected!("sse3"),
        sse41: is_x86_feature_detected!("sse4.1"),
        avx2: is_x86_feature_detected!("avx2"),
        neon: false,
    }
}

/// Queries the processor directly. Prefer [`cpu_features`], which caches.
#[cfg(target_arch = "aarch64")]
pub fn probe() -> CpuFeatures {
    CpuFeatures {
        neon: std::arch::is_aarch64_feature_detected!("neon"),
        ..CpuFeatures::NONE
    }
}

/// Queries the processor directly. Prefer [`cpu_features`], which caches.
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub fn probe() -> CpuFeatures {
    CpuFeatures::NONE
}

static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Process-wide capability set, probed on first use.
pub fn cpu_features() -> CpuFeatures {
    *CPU_FEATURES.get_or_init(|| {
        let features = probe();
        debug!(%features, vector = features.has_vector(), "probed cpu features");
        features
    })
}
