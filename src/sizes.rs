use anyhow::Result;

/// Sizes Chrome expects for a packaged extension logo.
const RESIZE_DEFAULT: [u32; 3] = [16, 48, 128];

/// Sizes the drawn lab icon is produced at, including the 32px toolbar variant.
const DRAW_DEFAULT: [u32; 4] = [16, 32, 48, 128];

/// Ordered set of square icon sizes in pixels.
///
/// Every size is positive. Duplicates are dropped, keeping the first occurrence,
/// so each size maps to exactly one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSet(Vec<u32>);

impl SizeSet {
    pub fn new(sizes: Vec<u32>) -> Result<Self> {
        if sizes.is_empty() {
            anyhow::bail!("At least one icon size is required");
        }
        if sizes.contains(&0) {
            anyhow::bail!("Icon sizes must be positive integers");
        }

        let mut unique = Vec::with_capacity(sizes.len());
        for size in sizes {
            if !unique.contains(&size) {
                unique.push(size);
            }
        }

        Ok(Self(unique))
    }

    pub fn resize_default() -> Self {
        Self(RESIZE_DEFAULT.to_vec())
    }

    pub fn draw_default() -> Self {
        Self(DRAW_DEFAULT.to_vec())
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// File name for a generated icon, e.g. `icon48.png`.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}
