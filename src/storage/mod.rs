pub mod names;

use crate::models::{AppMetadata, PackageFormat};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Downloaded artifacts live directly under the root; extracted expansion
/// files go to `obb/<package id>/` beneath it.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn obb_root(&self) -> PathBuf {
        self.root.join("obb")
    }

    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;
        fs::create_dir_all(self.obb_root())
            .with_context(|| format!("Failed to create {}", self.obb_root().display()))?;
        Ok(())
    }

    /// `{root}/{sanitized title}_v{version}.{ext}`, version defaulting to
    /// `latest` when the catalog did not report one.
    pub fn archive_path(&self, meta: &AppMetadata, format: PackageFormat) -> PathBuf {
        let name = names::sanitize(&meta.title, Some(&meta.package_id));
        let version = meta.version.as_deref().unwrap_or("latest");
        self.root
            .join(format!("{}_v{}.{}", name, version, format.extension()))
    }

    pub fn obb_dir(&self, package_id: &str) -> PathBuf {
        self.obb_root().join(package_id)
    }

    pub fn main_apk_path(&self, package_id: &str) -> PathBuf {
        self.root.join(format!("{}_main.apk", package_id))
    }

    /// Regular files directly under the root with their sizes, sorted by name.
    pub fn list_downloads(&self) -> Result<Vec<(String, u64)>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read {}", self.root.display()))?
        {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if metadata.is_file() {
                entries.push((entry.file_name().to_string_lossy().into_owned(), metadata.len()));
            }
        }

        entries.sort();
        Ok(entries)
    }
}
