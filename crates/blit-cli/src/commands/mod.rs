//! CLI command implementations

pub mod composite;
pub mod demo;
pub mod info;
pub mod transform;

use anyhow::{Context, Result};
use blit_ops::Image;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    blit_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    blit_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
