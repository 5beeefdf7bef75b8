//! Deterministic PNG writer and tolerant PNG reader.
//!
//! Encoding uses fixed compression settings so identical canvases produce
//! byte-identical files. Decoding accepts any 8- or 16-bit PNG and widens it
//! to RGBA.

use std::io::Write;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::canvas::{Canvas, Rgba};

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Use a fixed value for determinism.
    pub compression: Compression,
    /// Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smaller files, slower to write.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Larger files, faster to write.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a canvas as 8-bit RGBA to any writer.
pub fn write_rgba_to_writer<W: Write>(
    canvas: &Canvas,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if canvas.width() == 0 || canvas.height() == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{}",
            canvas.width(),
            canvas.height()
        )));
    }

    let mut encoder = Encoder::new(writer, canvas.width(), canvas.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // No timestamps or text chunks are written.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&canvas.to_rgba8())?;

    Ok(())
}

/// Write a canvas to a PNG byte vector.
pub fn write_rgba_to_vec(canvas: &Canvas, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(canvas, &mut data, config)?;
    Ok(data)
}

/// Write to a Vec<u8> and return the hash.
pub fn write_rgba_to_vec_with_hash(
    canvas: &Canvas,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let data = write_rgba_to_vec(canvas, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Decode PNG bytes into an RGBA canvas.
pub fn decode_rgba(bytes: &[u8]) -> Result<Canvas, PngError> {
    let mut decoder = Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels)?;
    pixels.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::InvalidDimensions(format!(
            "unsupported bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let rgba: Vec<u8> = match info.color_type {
        ColorType::Rgba => pixels,
        ColorType::Rgb => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        ColorType::Indexed => {
            return Err(PngError::InvalidDimensions(
                "indexed color was not expanded".into(),
            ))
        }
    };

    Canvas::from_rgba8(info.width, info.height, &rgba).ok_or_else(|| {
        PngError::InvalidDimensions(format!(
            "decoded {} bytes for {}x{}",
            rgba.len(),
            info.width,
            info.height
        ))
    })
}

/// Reads only the header of a PNG and returns its dimensions.
pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32), PngError> {
    let reader = Decoder::new(bytes).read_info()?;
    let info = reader.info();
    Ok((info.width, info.height))
}
