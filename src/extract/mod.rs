pub mod xapk;

use crate::storage::Layout;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use xapk::{ExtractReport, ExtractStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Other,
}

pub fn detect_kind(path: &Path) -> Result<ArchiveKind> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut magic = [0u8; 4];
    let mut read = 0;
    while read < magic.len() {
        let n = file
            .read(&mut magic[read..])
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        read += n;
    }

    // ZIP local file header magic: "PK\x03\x04"
    if read == magic.len() && magic == *b"PK\x03\x04" {
        Ok(ArchiveKind::Zip)
    } else {
        Ok(ArchiveKind::Other)
    }
}

/// Splits a ZIP-format bundle into OBB expansion files and a primary APK.
/// A plain (non-ZIP) artifact is already in its final form; nothing is
/// written and the empty report signals success.
pub fn extract_bundle(
    archive_path: &Path,
    package_id: &str,
    layout: &Layout,
    on_status: impl FnMut(ExtractStatus),
) -> Result<ExtractReport> {
    match detect_kind(archive_path)? {
        ArchiveKind::Other => Ok(ExtractReport::default()),
        ArchiveKind::Zip => xapk::extract(archive_path, package_id, layout, on_status),
    }
}
