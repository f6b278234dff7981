use crate::storage::Layout;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Entries under this prefix are archive metadata (e.g. __MACOSX), never a
/// real installable.
const RESERVED_PREFIX: &str = "__";

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub obb_files: Vec<PathBuf>,
    pub main_apk: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    Scanning,
    ExpansionFile { index: usize, total: usize },
    MainApk,
}

pub(crate) fn extract(
    archive_path: &Path,
    package_id: &str,
    layout: &Layout,
    mut on_status: impl FnMut(ExtractStatus),
) -> Result<ExtractReport> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file).context("Failed to read ZIP archive")?;

    on_status(ExtractStatus::Scanning);

    let obb_dir = layout.obb_dir(package_id);
    fs::create_dir_all(&obb_dir)
        .with_context(|| format!("Failed to create {}", obb_dir.display()))?;

    let obb_total = archive
        .file_names()
        .filter(|name| name.ends_with(".obb"))
        .count();

    let mut report = ExtractReport::default();
    let mut obb_index = 0;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .context("Failed to read archive entry")?;
        let name = entry.name().to_string();

        if name.ends_with(".obb") {
            obb_index += 1;
            on_status(ExtractStatus::ExpansionFile {
                index: obb_index,
                total: obb_total,
            });

            // Flatten: only the entry's base name survives.
            let base = name.rsplit('/').next().unwrap_or(&name);
            let target = obb_dir.join(base);
            let mut out = File::create(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
            io::copy(&mut entry, &mut out).context("Failed to extract expansion file")?;
            report.obb_files.push(target);
        } else if name.ends_with(".apk")
            && !name.starts_with(RESERVED_PREFIX)
            && report.main_apk.is_none()
        {
            on_status(ExtractStatus::MainApk);

            let target = layout.main_apk_path(package_id);
            let mut out = File::create(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
            io::copy(&mut entry, &mut out).context("Failed to extract main APK")?;
            report.main_apk = Some(target);
        }
    }

    Ok(report)
}
