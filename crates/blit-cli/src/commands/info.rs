//! Info command: capabilities, dispatch and image details

use crate::InfoArgs;
use anyhow::Result;
use blit_core::BlendMode;
use blit_math::{cpu_features, Dispatch, SpanOp};

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let features = cpu_features();
    let dispatch = Dispatch::detected();

    println!("CPU features:  {features}");
    println!("Vector blend:  {}", if dispatch.vector_enabled() { "enabled" } else { "disabled" });
    println!("Min run:       {} px", dispatch.min_run());

    if verbose {
        println!("Kernels (1024 px run):");
        for mode in BlendMode::ALL {
            let solid = dispatch.kernel(SpanOp::Solid(mode), 1024).name();
            let blit = dispatch.kernel(SpanOp::Blit { mode, tinted: false }, 1024).name();
            println!("  {:<9} fill: {solid:<7} blit: {blit}", mode.as_str());
        }
    }

    if let Some(path) = args.input {
        let image = super::load_image(&path)?;
        let (w, h) = image.dimensions();
        let opaque = image.pixels().iter().filter(|p| p.is_opaque()).count();
        let clear = image.pixels().iter().filter(|p| p.is_transparent()).count();

        println!();
        println!("{}", path.display());
        println!("  Resolution:  {w} x {h}");
        println!("  Pitch:       {} bytes", image.pitch());
        println!("  Size:        {} bytes", image.size_in_bytes());
        println!("  Opaque:      {opaque} px");
        println!("  Transparent: {clear} px");
    }

    Ok(())
}
