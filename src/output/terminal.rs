use crate::extract::ExtractReport;
use crate::models::{AppMetadata, DownloadTarget};
use crate::output::format_bytes;
use colored::*;
use std::path::Path;

pub fn print_app_card(meta: &AppMetadata) {
    println!("{}", "┌─────────────────────────────────────────────────────────────┐".bright_black());

    println!("│  App: {:<54}│", meta.title.bold());
    println!("│  Package: {:<50}│", meta.package_id);

    let version = meta.version.as_deref().unwrap_or("unknown");
    let rating = meta
        .rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "?".to_string());
    let installs = meta.installs.as_deref().unwrap_or("?");
    println!("│  Version: {} │ ⭐ {} │ Installs: {:<24}│", version, rating, installs);

    let genre = meta.genre.as_deref().unwrap_or("?");
    let developer = meta.developer.as_deref().unwrap_or("?");
    println!("│  Genre: {} │ Developer: {:<31}│", genre, developer);

    println!("{}", "└─────────────────────────────────────────────────────────────┘".bright_black());
    println!();
}

pub fn print_link_found(target: &DownloadTarget) {
    let size = target
        .size
        .map(format_bytes)
        .unwrap_or_else(|| "unknown size".to_string());
    println!(
        "{} {} ({})",
        "✔ Found download link:".green(),
        target.format.as_str().bold(),
        size
    );
}

pub fn print_app_not_found(query: &str) {
    eprintln!("{} {}", "✖ No app found for".red(), query.bold());
    eprintln!("  Check the app name and try again.");
}

/// Shown when every mirror strategy came up empty; the user can still try
/// the mirror pages by hand.
pub fn print_no_link(package_id: &str) {
    eprintln!("{}", "✖ No download link found".red());
    eprintln!("  You can try downloading manually:");
    eprintln!("  - https://apkcombo.com/{}/download", package_id);
    eprintln!("  - https://apkpure.com/{}", package_id);
}

pub fn print_download_failed() {
    eprintln!("{}", "✖ Download failed. Try again.".red());
}

pub fn print_downloaded(path: &Path, bytes: u64) {
    println!(
        "{} {} ({})",
        "✔ Downloaded".green(),
        path.display().to_string().bold(),
        format_bytes(bytes)
    );
}

pub fn print_extract_report(report: &ExtractReport, obb_dir: &Path) {
    if !report.obb_files.is_empty() {
        println!(
            "{} {} expansion file(s) in {}",
            "✔ Extracted".green(),
            report.obb_files.len(),
            obb_dir.display()
        );
    }
    if let Some(ref apk) = report.main_apk {
        println!("{} {}", "✔ Main APK:".green(), apk.display());
    }
    if report.obb_files.is_empty() && report.main_apk.is_none() {
        println!("{}", "No bundled files to extract".bright_black());
    }
}

pub fn print_extract_failed() {
    eprintln!("{}", "✖ Failed to extract the bundle".red());
}

pub fn print_downloads(entries: &[(String, u64)]) {
    if entries.is_empty() {
        println!("{}", "No downloaded files yet".bright_black());
        return;
    }

    println!("{}", format!("Downloaded files ({})", entries.len()).bold());
    for (name, bytes) in entries {
        println!("  {} {} ({})", "•".bright_black(), name, format_bytes(*bytes));
    }
}
