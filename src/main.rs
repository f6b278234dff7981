use anyhow::Result;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;

use apkfetch::catalog::{self, PlayCatalog};
use apkfetch::extract::{self, ExtractStatus};
use apkfetch::mirror::{apkcombo, apkpure};
use apkfetch::models::{DownloadTarget, FormatChoice, PackageFormat};
use apkfetch::storage::Layout;
use apkfetch::{download, http, output};

#[derive(Parser, Debug)]
#[command(name = "apkfetch")]
#[command(about = "Search Google Play and fetch APK/XAPK packages from mirror sites")]
struct Args {
    /// App name or package id (e.g. com.whatsapp)
    #[arg(required_unless_present = "list")]
    query: Option<String>,

    /// Package format to prefer (auto, apk, xapk)
    #[arg(long, default_value = "auto")]
    format: String,

    /// Downloads directory
    #[arg(long, default_value = "downloads")]
    out: PathBuf,

    /// List previously downloaded files and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let layout = Layout::new(&args.out);

    if args.list {
        layout.ensure()?;
        output::print_downloads(&layout.list_downloads()?);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(query) = args.query else {
        return Ok(ExitCode::SUCCESS);
    };
    let format: FormatChoice = args.format.parse()?;

    layout.ensure()?;
    let client = http::build_client();

    println!("{}", "Searching Google Play...".cyan());
    let play = PlayCatalog::new(client.clone());
    let Some(meta) = catalog::resolve(&play, &query).await else {
        output::print_app_not_found(&query);
        return Ok(ExitCode::FAILURE);
    };
    output::print_app_card(&meta);

    let prefer_bundle = meta.is_game() || format == FormatChoice::Xapk;

    println!("{}", "Looking for a download link...".cyan());
    let Some(target) = resolve_target(&client, &meta.package_id, prefer_bundle).await else {
        output::print_no_link(&meta.package_id);
        return Ok(ExitCode::FAILURE);
    };
    output::print_link_found(&target);

    let dest = layout.archive_path(&meta, target.format);
    let bar = progress_bar(target.size);
    let downloaded = download::download(&client, &target.url, &dest, |done, total| {
        if let Some(total) = total {
            bar.set_length(total);
        }
        bar.set_position(done);
    })
    .await;
    bar.finish_and_clear();

    let bytes = match downloaded {
        Ok(bytes) => bytes,
        Err(_) => {
            output::print_download_failed();
            return Ok(ExitCode::FAILURE);
        }
    };
    output::print_downloaded(&dest, bytes);

    if target.format == PackageFormat::Xapk {
        let report = extract::extract_bundle(&dest, &meta.package_id, &layout, print_status);
        match report {
            Ok(report) => output::print_extract_report(&report, &layout.obb_dir(&meta.package_id)),
            Err(_) => {
                output::print_extract_failed();
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Strategy order follows reliability per format: the scrape mirror only
/// serves plain APKs, so bundle requests go straight to the probe mirror.
async fn resolve_target(
    client: &reqwest::Client,
    package_id: &str,
    prefer_bundle: bool,
) -> Option<DownloadTarget> {
    if !prefer_bundle {
        if let Some(target) = apkcombo::resolve_link(client, package_id).await {
            return Some(target);
        }
    }
    apkpure::resolve_link(client, package_id, prefer_bundle).await
}

fn progress_bar(size: Option<u64>) -> ProgressBar {
    match size {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                )
                .expect("valid progress template")
                .progress_chars("#>-"),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} {bytes} downloaded")
                    .expect("valid progress template"),
            );
            bar
        }
    }
}

fn print_status(status: ExtractStatus) {
    match status {
        ExtractStatus::Scanning => println!("{}", "Scanning bundle contents...".cyan()),
        ExtractStatus::ExpansionFile { index, total } => {
            println!("{}", format!("Extracting expansion file {}/{}...", index, total).cyan());
        }
        ExtractStatus::MainApk => println!("{}", "Extracting main APK...".cyan()),
    }
}
