//! # blit-io
//!
//! File I/O for blit-rs images.
//!
//! The drawing crates only deal in raw RGBA pixel buffers; this crate is
//! the boundary to an external codec. PNG is handled through the `png`
//! crate.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use blit_core::Rgba;
//! use blit_ops::Image;
//!
//! let image = Image::filled(64, 64, Rgba::rgb(30, 60, 90))?;
//! blit_io::write("out.png", &image)?;
//!
//! let back = blit_io::read("out.png")?;
//! assert_eq!(back.pixels(), image.pixels());
//! # Ok::<(), blit_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use blit_ops::Image;
use tracing::debug;

mod error;
pub mod png;

pub use error::{IoError, IoResult};
pub use self::png::{read_from, write_to};

/// Checks that `path` names a format this crate can handle.
fn check_format(path: &Path) -> IoResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        Some(ext) => Err(IoError::UnsupportedFormat(format!(".{ext}"))),
        None => Err(IoError::UnsupportedFormat(format!(
            "no extension: {}",
            path.display()
        ))),
    }
}

/// Reads an image file.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for non-PNG paths, [`IoError::Io`] if the
/// file cannot be opened, [`IoError::DecodeError`] for corrupt data.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    check_format(path)?;
    debug!(path = %path.display(), "read");
    let file = File::open(path)?;
    self::png::read_from(BufReader::new(file))
}

/// Writes an image file, replacing any existing one.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    check_format(path)?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "write");
    let file = File::create(path)?;
    self::png::write_to(BufWriter::new(file), image)
}
