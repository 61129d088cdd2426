//! `icons.json` sidecar listing the generated icons in the shape Chrome's
//! `manifest.json` expects, so the block can be pasted into the extension.

use crate::sizes::icon_file_name;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const MANIFEST_FILE_NAME: &str = "icons.json";

/// Root of the sidecar file.
///
/// Serializes to `{"icons": {...}, "action": {"default_icon": {...}}}` with
/// sizes as keys, ordered ascending.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IconManifest {
    pub icons: BTreeMap<u32, String>,
    pub action: Action,
}

/// Toolbar button icons.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    pub default_icon: BTreeMap<u32, String>,
}

impl IconManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest whose paths are `{prefix}/icon{size}.png`.
    pub fn from_sizes(prefix: &str, sizes: impl IntoIterator<Item = u32>) -> Self {
        let mut manifest = Self::new();
        for size in sizes {
            manifest.add_icon(prefix, size);
        }
        manifest
    }

    pub fn add_icon(&mut self, prefix: &str, size: u32) {
        let prefix = prefix.trim_end_matches('/');
        let path = if prefix.is_empty() {
            icon_file_name(size)
        } else {
            format!("{prefix}/{}", icon_file_name(size))
        };

        self.icons.insert(size, path.clone());
        self.action.default_icon.insert(size, path);
    }
}

/// Write `icons.json` into `out_dir`.
pub fn write_manifest(out_dir: &Path, manifest: &IconManifest) -> Result<PathBuf> {
    let manifest_path = out_dir.join(MANIFEST_FILE_NAME);
    let manifest_json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize icons.json")?;

    std::fs::write(&manifest_path, manifest_json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    println!("  ✓ Generated {MANIFEST_FILE_NAME}");
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_use_prefix_and_sorted_sizes() {
        let manifest = IconManifest::from_sizes("icons/", [128, 16, 48]);

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["icons"]["16"], "icons/icon16.png");
        assert_eq!(json["icons"]["128"], "icons/icon128.png");
        assert_eq!(json["action"]["default_icon"]["48"], "icons/icon48.png");

        let keys: Vec<_> = manifest.icons.keys().copied().collect();
        assert_eq!(keys, vec![16, 48, 128]);
    }

    #[test]
    fn empty_prefix_uses_bare_file_names() {
        let manifest = IconManifest::from_sizes("", [32]);
        assert_eq!(manifest.icons[&32], "icon32.png");
    }

    #[test]
    fn written_file_is_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = IconManifest::from_sizes("icons", [16, 48]);

        let path = write_manifest(temp_dir.path(), &manifest).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert!(parsed["icons"].is_object());
        assert_eq!(parsed["icons"].as_object().unwrap().len(), 2);
    }
}
