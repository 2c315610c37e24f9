//! Error types for blit-core operations.
//!
//! Only buffer construction, reallocation and region copies can fail.
//! Drawing calls are total over their input and never produce an [`Error`].
//!
//! # Usage
//!
//! ```rust
//! use blit_core::{Error, Result};
//!
//! fn check(width: i32, height: i32) -> Result<()> {
//!     if width <= 0 || height <= 0 {
//!         return Err(Error::invalid_dimensions(width, height, "must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(0, 10).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating or reshaping pixel buffers.
///
/// # Categories
///
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`SizeMismatch`](Error::SizeMismatch)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **Region errors**: [`InvalidRegion`](Error::InvalidRegion)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height is zero, negative, or overflows the buffer size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A supplied pixel source does not hold exactly `width * height` pixels.
    #[error("pixel source holds {got} elements, expected {expected}")]
    SizeMismatch {
        /// Expected element count
        expected: usize,
        /// Supplied element count
        got: usize,
    },

    /// The pixel array could not be allocated.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// A region does not overlap the image it refers to.
    #[error("region ({x}, {y}, {width}x{height}) does not overlap image {image_width}x{image_height}")]
    InvalidRegion {
        /// Region X origin
        x: i32,
        /// Region Y origin
        y: i32,
        /// Region width
        width: i32,
        /// Region height
        height: i32,
        /// Image width
        image_width: i32,
        /// Image height
        image_height: i32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: i32, height: i32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        Self::SizeMismatch { expected, got }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(region: crate::Rect, image_width: i32, image_height: i32) -> Self {
        Self::InvalidRegion {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            image_width,
            image_height,
        }
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
