//! # blit-math
//!
//! Per-pixel arithmetic for RGBA raster drawing.
//!
//! - [`cpu`] - One-time processor capability probe
//! - [`blend`] - Scalar blend engine, the reference for every mode
//! - [`simd`] - Vectorized blend engine built on [`wide`]
//! - [`dispatch`] - Kernel selection from capabilities, op kind and run length
//! - [`interp`] - Colour interpolation (linear, bilinear, barycentric)
//! - [`config`] - Environment overrides for the dispatcher
//!
//! # Design
//!
//! The scalar and vector kernels implement the same integer formulas lane
//! for lane, so their output is byte-identical. Callers never pick a kernel
//! directly; they ask a [`Dispatch`] value for one:
//!
//! ```rust
//! use blit_core::{BlendMode, Rgba};
//! use blit_math::{Dispatch, SpanOp};
//!
//! let dispatch = Dispatch::detected();
//! let mut row = vec![Rgba::rgb(0, 0, 255); 64];
//! let kernel = dispatch.kernel(SpanOp::Solid(BlendMode::Mix), row.len());
//! kernel.blend_solid(&mut row, Rgba::new(255, 0, 0, 128), BlendMode::Mix);
//! assert_eq!(row[0], Rgba::new(128, 0, 127, 255));
//! ```
//!
//! # Dependencies
//!
//! - [`wide`] - Portable SIMD on stable Rust
//! - [`tracing`] - Capability and dispatch logging

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blend;
pub mod config;
pub mod cpu;
pub mod dispatch;
pub mod interp;
pub mod simd;

pub use blend::{blend_pixel, div255, tint, ScalarKernel};
pub use cpu::{cpu_features, probe, CpuFeatures};
pub use dispatch::{BlendKernel, Dispatch, SpanOp};
pub use interp::{barycentric_rgba, bilinear_rgba, lerp_rgba};
pub use simd::SimdKernel;
