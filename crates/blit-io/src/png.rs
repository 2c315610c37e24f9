//! PNG format support.
//!
//! Reads 8-bit and 16-bit PNGs of any colour type into an RGBA8
//! [`Image`]: palettes and low bit depths are expanded, 16-bit samples are
//! stripped to 8 bits, and greyscale/RGB gain the missing channels. Writes
//! always produce 8-bit RGBA.

use std::io::{BufRead, Seek, Write};

use blit_ops::Image;
use tracing::debug;

use crate::{IoError, IoResult};

/// Decodes a PNG stream.
pub fn read_from<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => return Err(IoError::UnsupportedFormat(format!("{other:?}"))),
    };

    debug!(width = info.width, height = info.height, color = ?info.color_type, "decoded png");
    let (w, h) = dimensions(info.width, info.height)?;
    Ok(Image::from_bytes(w, h, &rgba)?)
}

/// Encodes `image` as an 8-bit RGBA PNG.
pub fn write_to<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, image.width() as u32, image.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.as_bytes())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

fn dimensions(width: u32, height: u32) -> IoResult<(i32, i32)> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(IoError::UnsupportedFormat(format!("{width}x{height} exceeds i32"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blit_core::Rgba;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_stream_roundtrip() {
        let px: Vec<Rgba> = (0..12u8).map(|i| Rgba::new(i * 20, 255 - i, i, i * 10)).collect();
        let image = Image::from_pixels(4, 3, &px).unwrap();

        let mut bytes = Vec::new();
        write_to(&mut bytes, &image).unwrap();
        let loaded = read_from(Cursor::new(bytes)).unwrap();

        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.pixels(), image.pixels());
    }

    #[test]
    fn test_grey_expands_to_rgba() {
        let bytes = encode_raw(2, 1, png::ColorType::Grayscale, &[10, 200]);
        let img = read_from(Cursor::new(bytes)).unwrap();
        assert_eq!(img.pixel(0, 0), Rgba::new(10, 10, 10, 255));
        assert_eq!(img.pixel(1, 0), Rgba::new(200, 200, 200, 255));
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let bytes = encode_raw(1, 2, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let img = read_from(Cursor::new(bytes)).unwrap();
        assert_eq!(img.pixel(0, 1), Rgba::new(4, 5, 6, 255));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = read_from(Cursor::new(b"definitely not a png".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
