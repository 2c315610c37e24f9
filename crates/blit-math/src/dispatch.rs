//! Kernel selection.
//!
//! A [`Dispatch`] value decides, for one run of pixels, whether the scalar
//! or the vector kernel does the work. The decision is a pure function of
//! the capability set, the operation kind and the run length; there is no
//! global switch to flip at runtime.
//!
//! ```rust
//! use blit_core::BlendMode;
//! use blit_math::{CpuFeatures, Dispatch, SpanOp};
//!
//! let scalar = Dispatch::scalar();
//! assert_eq!(scalar.kernel(SpanOp::Solid(BlendMode::Mix), 1024).name(), "scalar");
//!
//! let sse2 = Dispatch::new(CpuFeatures { sse2: true, ..CpuFeatures::NONE }, 8);
//! assert_eq!(sse2.kernel(SpanOp::Solid(BlendMode::Mix), 1024).name(), "simd");
//! assert_eq!(sse2.kernel(SpanOp::Solid(BlendMode::Mix), 4).name(), "scalar");
//! ```

use crate::blend::ScalarKernel;
use crate::config;
use crate::cpu::{cpu_features, CpuFeatures};
use crate::simd::SimdKernel;
use blit_core::{BlendMode, Rgba};
use std::sync::OnceLock;
use tracing::debug;

/// A span-level blend implementation.
///
/// Implementations must produce byte-identical output for every input.
pub trait BlendKernel: Sync {
    /// Short identifier, for logs and tests.
    fn name(&self) -> &'static str;

    /// Blends one colour onto every pixel of `dst`.
    fn blend_solid(&self, dst: &mut [Rgba], color: Rgba, mode: BlendMode);

    /// Blends `src[i]` onto `dst[i]`. Both slices have the same length.
    fn blend_span(&self, dst: &mut [Rgba], src: &[Rgba], mode: BlendMode);
}

/// The kind of span operation a kernel is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanOp {
    /// One colour blended across a run (fills, horizontal lines).
    Solid(BlendMode),
    /// A source row blended onto a destination row.
    Blit {
        /// Active blend mode
        mode: BlendMode,
        /// Whether a non-white tint is multiplied into the source
        tinted: bool,
    },
}

impl SpanOp {
    /// Whether the vector kernel is allowed for this op at all.
    #[inline]
    fn vectorizable(self) -> bool {
        match self {
            SpanOp::Solid(_) => true,
            SpanOp::Blit { mode, tinted } => {
                !tinted && matches!(mode, BlendMode::Set | BlendMode::Mix)
            }
        }
    }
}

static SCALAR: ScalarKernel = ScalarKernel;
static SIMD: SimdKernel = SimdKernel;
static DETECTED: OnceLock<Dispatch> = OnceLock::new();

/// Immutable kernel-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    features: CpuFeatures,
    min_run: usize,
}

impl Dispatch {
    /// Creates a dispatcher for an explicit capability set.
    pub fn new(features: CpuFeatures, min_run: usize) -> Self {
        Self {
            features,
            min_run: min_run.max(1),
        }
    }

    /// A dispatcher that always picks the scalar kernel.
    pub fn scalar() -> Self {
        Self::new(CpuFeatures::NONE, config::DEFAULT_MIN_RUN)
    }

    /// The process-wide dispatcher: probed CPU features masked by the
    /// `BLIT_SIMD` / `BLIT_SIMD_MIN_RUN` environment settings.
    pub fn detected() -> Self {
        *DETECTED.get_or_init(|| {
            let features = if config::simd_enabled() {
                cpu_features()
            } else {
                CpuFeatures::NONE
            };
            let dispatch = Self::new(features, config::min_run());
            debug!(
                vector = dispatch.vector_enabled(),
                min_run = dispatch.min_run,
                "blend dispatch configured"
            );
            dispatch
        })
    }

    /// Capability set this dispatcher decides from.
    #[inline]
    pub fn features(&self) -> CpuFeatures {
        self.features
    }

    /// Shortest run handed to the vector kernel.
    #[inline]
    pub fn min_run(&self) -> usize {
        self.min_run
    }

    /// Returns `true` if any op can reach the vector kernel.
    #[inline]
    pub fn vector_enabled(&self) -> bool {
        self.features.has_vector()
    }

    /// Picks the kernel for one run of `len` pixels.
    #[inline]
    pub fn kernel(&self, op: SpanOp, len: usize) -> &'static dyn BlendKernel {
        if self.vector_enabled() && len >= self.min_run && op.vectorizable() {
            &SIMD
        } else {
            &SCALAR
        }
    }
}

impl Default for Dispatch {
    fn default() -> Self {
        Self::detected()
    }
}
