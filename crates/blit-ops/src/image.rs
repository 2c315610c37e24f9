//! The RGBA pixel buffer.
//!
//! An [`Image`] owns a row-major `Vec<Rgba>` of exactly `width * height`
//! pixels together with its drawing state: the clip rectangle, the active
//! [`BlendMode`] and the kernel [`Dispatch`] used by span-level hot paths.
//!
//! # Example
//!
//! ```rust
//! use blit_core::{BlendMode, Rect, Rgba};
//! use blit_ops::Image;
//!
//! let mut img = Image::filled(64, 32, Rgba::BLACK)?;
//! img.set_clip_rect(Rect::new(-10, -10, 40, 20));
//! assert_eq!(img.clip_rect(), Rect::new(0, 0, 30, 10));
//!
//! img.set_blend_mode(BlendMode::Set);
//! assert_eq!(img.size_in_bytes(), 64 * 32 * 4);
//! # Ok::<(), blit_core::Error>(())
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use blit_core::{BlendMode, Error, Point, Rect, Result, Rgba};
use blit_math::{blend_pixel, Dispatch, SpanOp};
use tracing::debug;

/// Validates dimensions and returns the pixel count.
pub(crate) fn pixel_count(width: i32, height: i32) -> Result<usize> {
    if width <= 0 || height <= 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be positive"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|n| n.checked_mul(4).is_some())
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

/// Allocates `len` pixels of `fill` without aborting on exhaustion.
pub(crate) fn alloc_pixels(len: usize, fill: Rgba) -> Result<Vec<Rgba>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|e| Error::allocation_failed(len * 4, e.to_string()))?;
    pixels.resize(len, fill);
    Ok(pixels)
}

/// An owned RGBA raster with clip and blend state.
#[derive(Clone)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<Rgba>,
    bbox: Rect,
    clip_rect: Rect,
    blend_mode: BlendMode,
    dispatch: Dispatch,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip_rect", &self.clip_rect)
            .field("blend_mode", &self.blend_mode)
            .finish_non_exhaustive()
    }
}

impl Image {
    pub(crate) fn from_parts(width: i32, height: i32, pixels: Vec<Rgba>) -> Self {
        let bbox = Rect::from_size(width, height);
        Self {
            width,
            height,
            pixels,
            bbox,
            clip_rect: bbox,
            blend_mode: BlendMode::default(),
            dispatch: Dispatch::detected(),
        }
    }

    /// Creates an image of transparent black pixels.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for non-positive sizes,
    /// [`Error::AllocationFailed`] when the buffer cannot be reserved.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Creates an image with every pixel set to `color`.
    pub fn filled(width: i32, height: i32, color: Rgba) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self::from_parts(width, height, alloc_pixels(len, color)?))
    }

    /// Creates an image by copying `width * height` pixels.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] when `pixels` has the wrong length.
    pub fn from_pixels(width: i32, height: i32, pixels: &[Rgba]) -> Result<Self> {
        let len = pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(Error::size_mismatch(len, pixels.len()));
        }
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len * 4, e.to_string()))?;
        buf.extend_from_slice(pixels);
        Ok(Self::from_parts(width, height, buf))
    }

    /// Creates an image from tightly packed RGBA8 bytes.
    ///
    /// ```rust
    /// use blit_core::Rgba;
    /// use blit_ops::Image;
    ///
    /// let img = Image::from_bytes(2, 1, &[255, 0, 0, 255, 0, 0, 255, 128])?;
    /// assert_eq!(img.pixel(1, 0), Rgba::new(0, 0, 255, 128));
    /// # Ok::<(), blit_core::Error>(())
    /// ```
    pub fn from_bytes(width: i32, height: i32, bytes: &[u8]) -> Result<Self> {
        let len = pixel_count(width, height)?;
        if bytes.len() != len * 4 {
            return Err(Error::size_mismatch(len * 4, bytes.len()));
        }
        Self::from_pixels(width, height, bytemuck::cast_slice(bytes))
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Bytes per row.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    /// Total buffer size in bytes.
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.pixels.len() * 4
    }

    /// Total number of pixels.
    #[inline]
    pub fn size_in_pixels(&self) -> usize {
        self.pixels.len()
    }

    /// Row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Mutable row-major pixel data.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Pixel data viewed as RGBA8 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.bbox.contains(Point::new(x, y)),
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Reads one pixel. Coordinates are only checked in debug builds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Writes one pixel, ignoring clip and blend mode. Coordinates are only
    /// checked in debug builds.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// The full image rectangle `(0, 0, width, height)`.
    #[inline]
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Current clip rectangle, always inside [`bbox`](Self::bbox).
    #[inline]
    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Sets the clip rectangle, clamped to the image bounds.
    pub fn set_clip_rect(&mut self, rect: Rect) {
        self.clip_rect = rect.clamp_to(&self.bbox);
    }

    /// Active blend mode.
    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Sets the blend mode for subsequent drawing.
    #[inline]
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    /// Kernel dispatcher used for span operations.
    #[inline]
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Replaces the kernel dispatcher.
    #[inline]
    pub fn set_dispatch(&mut self, dispatch: Dispatch) {
        self.dispatch = dispatch;
    }

    /// Builder form of [`set_dispatch`](Self::set_dispatch).
    #[inline]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Reallocates the image to `width x height` transparent pixels.
    ///
    /// Content is not preserved; `bbox` and the clip rectangle are reset.
    /// On error the image is left untouched.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let len = pixel_count(width, height)?;
        let pixels = alloc_pixels(len, Rgba::TRANSPARENT)?;
        debug!(from_w = self.width, from_h = self.height, width, height, "resize");
        self.reset(width, height, pixels);
        Ok(())
    }

    /// Swaps in a new buffer of matching dimensions.
    pub(crate) fn reset(&mut self, width: i32, height: i32, pixels: Vec<Rgba>) {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        self.bbox = Rect::from_size(width, height);
        self.clip_rect = self.bbox;
    }

    /// Sets the alpha channel of every pixel.
    pub fn set_alpha(&mut self, alpha: u8) {
        for px in &mut self.pixels {
            px.a = alpha;
        }
    }

    /// Overwrites every pixel with `color`, ignoring clip and blend mode.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Converts every pixel to its luma, keeping alpha.
    pub fn grey(&mut self) {
        for px in &mut self.pixels {
            let l = px.luma();
            *px = Rgba::new(l, l, l, px.a);
        }
    }

    // ---- clipped write helpers shared by the drawing modules ----

    /// Blends one pixel if it lies inside the clip rectangle.
    #[inline]
    pub(crate) fn plot(&mut self, x: i32, y: i32, color: Rgba) {
        if self.clip_rect.contains(Point::new(x, y)) {
            let i = self.index(x, y);
            self.pixels[i] = blend_pixel(self.pixels[i], color, self.blend_mode);
        }
    }

    /// Blends `color` over columns `x0..x1` of row `y`, clipped.
    pub(crate) fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Rgba) {
        let clip = self.clip_rect;
        if y < clip.y || y >= clip.bottom() {
            return;
        }
        let x0 = x0.max(clip.x);
        let x1 = x1.min(clip.right());
        if x0 >= x1 {
            return;
        }
        let mode = self.blend_mode;
        let kernel = self.dispatch.kernel(SpanOp::Solid(mode), (x1 - x0) as usize);
        let start = self.index(x0, y);
        kernel.blend_solid(&mut self.pixels[start..start + (x1 - x0) as usize], color, mode);
    }

    /// Blends `src` onto row `y` starting at column `x`, clipped.
    ///
    /// `tinted` only affects kernel selection; the caller has already
    /// multiplied any tint into `src`.
    pub(crate) fn blend_row(&mut self, x: i32, y: i32, src: &[Rgba], tinted: bool) {
        let clip = self.clip_rect;
        if y < clip.y || y >= clip.bottom() {
            return;
        }
        let x0 = x.max(clip.x);
        let x1 = x.saturating_add(src.len() as i32).min(clip.right());
        if x0 >= x1 {
            return;
        }
        let len = (x1 - x0) as usize;
        let src = &src[(x0 - x) as usize..(x0 - x) as usize + len];
        let mode = self.blend_mode;
        let kernel = self.dispatch.kernel(SpanOp::Blit { mode, tinted }, len);
        let start = self.index(x0, y);
        kernel.blend_span(&mut self.pixels[start..start + len], src, mode);
    }

    /// One row of pixels, `x0..x1`, with no clipping.
    #[inline]
    pub(crate) fn row(&self, y: i32, x0: i32, x1: i32) -> &[Rgba] {
        let start = self.index(x0, y);
        &self.pixels[start..start + (x1 - x0) as usize]
    }
}

/// A reference-counted, interiorly mutable handle to an [`Image`].
///
/// Cloning the handle shares the image; it is dropped with its last holder.
///
/// ```rust
/// use blit_core::Rgba;
/// use blit_ops::{Image, SharedImage};
///
/// let a = SharedImage::new(Image::new(4, 4)?);
/// let b = a.clone();
/// b.borrow_mut().clear(Rgba::WHITE);
/// assert_eq!(a.borrow().pixel(0, 0), Rgba::WHITE);
/// assert_eq!(a.holders(), 2);
/// # Ok::<(), blit_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SharedImage(Rc<RefCell<Image>>);

impl SharedImage {
    /// Wraps an image in a new handle.
    pub fn new(image: Image) -> Self {
        Self(Rc::new(RefCell::new(image)))
    }

    /// Borrows the image immutably.
    ///
    /// # Panics
    ///
    /// Panics if the image is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Image> {
        self.0.borrow()
    }

    /// Borrows the image mutably.
    ///
    /// # Panics
    ///
    /// Panics if the image is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Image> {
        self.0.borrow_mut()
    }

    /// Number of handles sharing this image.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Returns `true` if both handles refer to the same image.
    pub fn ptr_eq(&self, other: &SharedImage) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Takes the image back if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<Image, SharedImage> {
        Rc::try_unwrap(self.0).map(RefCell::into_inner).map_err(SharedImage)
    }
}

impl From<Image> for SharedImage {
    fn from(image: Image) -> Self {
        Self::new(image)
    }
}
