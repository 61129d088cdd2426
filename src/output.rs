use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Create the output directory if it does not exist yet.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir)
        .with_context(|| format!("Can't create output directory {}", dir.display()))
}

/// Write an RGBA image as PNG, replacing any existing file at `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(image.as_raw(), image.width(), image.height(), &mut out_file)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with the best lossless compression
pub fn write_png<W: Write>(image_data: &[u8], width: u32, height: u32, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}
