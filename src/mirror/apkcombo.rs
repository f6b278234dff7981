use crate::models::{DownloadTarget, PackageFormat};
use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

const MIRROR_BASE: &str = "https://apkcombo.com";

/// Two-hop scrape: the landing page links to a download page, which carries
/// the direct link. Any missing element or transport fault is a miss; this
/// mirror changes its markup often enough that failure is routine.
pub async fn resolve_link(client: &Client, package_id: &str) -> Option<DownloadTarget> {
    scrape(client, package_id).await.ok().flatten()
}

async fn scrape(client: &Client, package_id: &str) -> Result<Option<DownloadTarget>> {
    let landing_url = format!("{}/{}/download/apk", MIRROR_BASE, package_id);

    let response = client
        .get(&landing_url)
        .send()
        .await
        .context("Failed to fetch download landing page")?
        .error_for_status()
        .context("Landing page returned an error status")?;

    let landing = response
        .text()
        .await
        .context("Failed to read landing page")?;

    let Some(href) = find_download_anchor(&landing) else {
        return Ok(None);
    };
    let download_page_url = absolutize(&href)?;

    let download_page = client
        .get(download_page_url)
        .send()
        .await
        .context("Failed to fetch download page")?
        .text()
        .await
        .context("Failed to read download page")?;

    Ok(find_direct_link(&download_page).map(|url| DownloadTarget {
        url,
        format: PackageFormat::Apk,
        size: None,
    }))
}

/// Primary download action on the landing page: the variant button, or any
/// anchor pointing at a download path when the button class is missing.
pub fn find_download_anchor(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let variant = Selector::parse("a.variant").expect("valid selector");
    let fallback = Selector::parse(r#"a[href*="download"]"#).expect("valid selector");

    let anchor = document
        .select(&variant)
        .next()
        .or_else(|| document.select(&fallback).next())?;

    anchor.value().attr("href").map(str::to_owned)
}

/// The direct-link anchor on the second page.
pub fn find_direct_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let direct = Selector::parse("a#download-link").expect("valid selector");

    document
        .select(&direct)
        .next()?
        .value()
        .attr("href")
        .map(str::to_owned)
}

fn absolutize(href: &str) -> Result<Url> {
    if href.starts_with("http") {
        Url::parse(href).context("Invalid download page URL")
    } else {
        Url::parse(MIRROR_BASE)
            .expect("valid mirror base URL")
            .join(href)
            .context("Invalid relative download page URL")
    }
}
