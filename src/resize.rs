use crate::{
    output::{prepare_output_dir, save_png},
    sizes::{icon_file_name, SizeSet},
};
use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage};
use std::path::{Path, PathBuf};

/// Resize a source logo into one square `icon{size}.png` per size.
///
/// The source is checked and decoded before anything is written, so a missing
/// or unreadable source leaves the file system untouched. Output is always
/// RGBA; sources without an alpha channel are converted first.
pub fn generate_resized(source: &Path, out_dir: &Path, sizes: &SizeSet) -> Result<Vec<PathBuf>> {
    if !source.exists() {
        anyhow::bail!("Source logo not found at {}", source.display());
    }

    println!("Opening source image: {}", source.display());
    let source = load_image(source)?;
    println!("Original size: {}x{}", source.width(), source.height());

    prepare_output_dir(out_dir)?;

    let mut written = Vec::with_capacity(sizes.len());
    for size in sizes.iter() {
        let resized = source
            .resize_exact(size, size, FilterType::Lanczos3)
            .to_rgba8();
        let output_path = out_dir.join(icon_file_name(size));
        save_png(&resized, &output_path)?;
        println!("  ✓ Generated {size}x{size} icon: {}", output_path.display());
        written.push(output_path);
    }

    println!("✓ All icons saved to {}", out_dir.display());
    Ok(written)
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let source = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;

    if source.color().has_alpha() {
        Ok(source)
    } else {
        Ok(DynamicImage::ImageRgba8(source.to_rgba8()))
    }
}
