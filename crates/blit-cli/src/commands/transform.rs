//! Transform command (flip, rotate, grey)

use crate::TransformArgs;
use anyhow::{bail, Result};

pub fn run(args: TransformArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_image(&args.input)?;

    if verbose {
        println!("Transforming {}", args.input.display());
    }

    // Apply transformations in order
    if args.flip_h {
        if verbose {
            println!("  Flip horizontal");
        }
        image.flip_horizontal();
    }

    if args.flip_v {
        if verbose {
            println!("  Flip vertical");
        }
        image.flip_vertical();
    }

    if let Some(angle) = args.rotate {
        if verbose {
            println!("  Rotate {angle} degrees");
        }
        match angle {
            90 => image.rotate_clockwise()?,
            180 => {
                image.flip_horizontal();
                image.flip_vertical();
            }
            270 | -90 => image.rotate_counter_clockwise()?,
            _ => bail!("Unsupported rotation angle: {angle}. Use 90, 180, or 270."),
        }
    }

    if args.grey {
        if verbose {
            println!("  Greyscale");
        }
        image.grey();
    }

    super::save_image(&args.output, &image)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
