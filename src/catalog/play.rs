use super::Catalog;
use crate::fallback::Locale;
use crate::models::{AppMetadata, SearchHit};
use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use url::Url;

const DETAILS_URL: &str = "https://play.google.com/store/apps/details";
const SEARCH_URL: &str = "https://play.google.com/store/search";

static DETAILS_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/store/apps/details\?id=([A-Za-z0-9._]+)").unwrap());

/// Catalog backed by the public Play Store web pages. Metadata comes from the
/// JSON-LD block every details page embeds; search hits come from the details
/// links scattered through the results page.
pub struct PlayCatalog {
    client: Client,
}

impl PlayCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub fn details_url(package_id: &str, locale: &Locale) -> String {
    Url::parse_with_params(
        DETAILS_URL,
        &[
            ("id", package_id),
            ("hl", locale.lang),
            ("gl", locale.country),
        ],
    )
    .expect("valid details URL")
    .to_string()
}

pub fn search_url(query: &str, locale: &Locale) -> String {
    Url::parse_with_params(
        SEARCH_URL,
        &[
            ("q", query),
            ("c", "apps"),
            ("hl", locale.lang),
            ("gl", locale.country),
        ],
    )
    .expect("valid search URL")
    .to_string()
}

#[async_trait]
impl Catalog for PlayCatalog {
    async fn lookup(&self, package_id: &str, locale: &Locale) -> Result<Option<AppMetadata>> {
        let url = details_url(package_id, locale);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch app details")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!(
                "Details request failed with status {}: {}",
                response.status(),
                package_id
            );
        }

        let html = response
            .text()
            .await
            .context("Failed to read details page")?;

        parse_details_page(&html, package_id).map(Some)
    }

    async fn search(
        &self,
        query: &str,
        locale: &Locale,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let url = search_url(query, locale);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch search results")?;

        if !response.status().is_success() {
            anyhow::bail!("Search request failed with status {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read search page")?;

        Ok(parse_search_page(&html, limit))
    }
}

fn parse_details_page(html: &str, package_id: &str) -> Result<AppMetadata> {
    let document = Html::parse_document(html);
    let scripts =
        Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector");

    for script in document.select(&scripts) {
        let raw: String = script.text().collect();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        if data.get("@type").and_then(|v| v.as_str()) != Some("SoftwareApplication") {
            continue;
        }

        let mut meta = AppMetadata::new(
            data.get("name")
                .and_then(|v| v.as_str())
                .unwrap_or(package_id),
            package_id,
        );
        meta.rating = rating_value(&data);
        meta.genre = data
            .get("applicationCategory")
            .and_then(|v| v.as_str())
            .map(str::to_owned);
        meta.icon = data.get("image").and_then(|v| v.as_str()).map(str::to_owned);
        meta.developer = data
            .pointer("/author/name")
            .and_then(|v| v.as_str())
            .map(str::to_owned);
        return Ok(meta);
    }

    anyhow::bail!("App metadata block not found for {}", package_id)
}

// ratingValue arrives as a string on some locales and a number on others.
fn rating_value(data: &serde_json::Value) -> Option<f32> {
    let value = data.pointer("/aggregateRating/ratingValue")?;
    if let Some(n) = value.as_f64() {
        return Some(n as f32);
    }
    value.as_str()?.parse().ok()
}

fn parse_search_page(html: &str, limit: usize) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = Vec::new();

    for caps in DETAILS_LINK_RE.captures_iter(html) {
        let package_id = caps[1].to_string();
        if hits.iter().any(|h| h.package_id == package_id) {
            continue;
        }
        hits.push(SearchHit {
            package_id,
            title: None,
        });
        if hits.len() == limit {
            break;
        }
    }

    hits
}
