//! Composite command

use crate::CompositeArgs;
use anyhow::Result;
use blit_core::{BlendMode, Point, Rgba};
use blit_ops::DrawParams;
use tracing::debug;

pub fn run(args: CompositeArgs, verbose: bool) -> Result<()> {
    let fg = super::load_image(&args.fg)?;
    let mut bg = super::load_image(&args.bg)?;

    let mode: BlendMode = args.mode.parse().map_err(anyhow::Error::msg)?;

    if verbose {
        println!(
            "Compositing {} onto {} with mode '{mode}'",
            args.fg.display(),
            args.bg.display()
        );
    }

    let params = DrawParams {
        angle: args.angle.to_radians(),
        scale: args.scale,
        tint: Rgba::WHITE.with_alpha(args.opacity),
    };
    debug!(?params, x = args.x, y = args.y, "composite");

    bg.set_blend_mode(mode);
    bg.draw_with(&fg, None, Point::new(args.x, args.y), params);

    super::save_image(&args.output, &bg)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
