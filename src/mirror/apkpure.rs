use crate::fallback::first_hit;
use crate::http::PROBE_TIMEOUT;
use crate::models::{DownloadTarget, PackageFormat};
use anyhow::Result;
use futures_util::FutureExt;
use reqwest::Client;

const MIRROR_BASE: &str = "https://d.apkpure.com/b";

/// Candidate download URLs for both formats, preferred format first.
pub fn candidate_urls(package_id: &str, prefer_bundle: bool) -> [(String, PackageFormat); 2] {
    let apk = (
        format!("{}/APK/{}?version=latest", MIRROR_BASE, package_id),
        PackageFormat::Apk,
    );
    let xapk = (
        format!("{}/XAPK/{}?version=latest", MIRROR_BASE, package_id),
        PackageFormat::Xapk,
    );

    if prefer_bundle {
        [xapk, apk]
    } else {
        [apk, xapk]
    }
}

/// Probes the candidates in order with a bodyless HEAD request and returns the
/// first confirmed one. A candidate that times out or errors is skipped.
pub async fn resolve_link(
    client: &Client,
    package_id: &str,
    prefer_bundle: bool,
) -> Option<DownloadTarget> {
    first_hit(
        candidate_urls(package_id, prefer_bundle)
            .into_iter()
            .map(|(url, format)| {
                let client = client.clone();
                async move { probe(&client, &url, format).await }.boxed()
            }),
    )
    .await
}

async fn probe(client: &Client, url: &str, format: PackageFormat) -> Result<Option<DownloadTarget>> {
    let response = client.head(url).timeout(PROBE_TIMEOUT).send().await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    // The probe followed redirects; keep the final URL so the download does
    // not have to chase them again.
    Ok(Some(DownloadTarget {
        url: response.url().to_string(),
        format,
        size: response.content_length(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order_prefers_bundle() {
        let [(first, first_format), (second, second_format)] =
            candidate_urls("com.tencent.ig", true);

        assert!(first.contains("/XAPK/com.tencent.ig"));
        assert_eq!(first_format, PackageFormat::Xapk);
        assert!(second.contains("/APK/com.tencent.ig"));
        assert_eq!(second_format, PackageFormat::Apk);
    }

    #[test]
    fn test_candidate_order_defaults_to_apk() {
        let [(first, first_format), (second, _)] = candidate_urls("com.whatsapp", false);

        assert!(first.contains("/APK/com.whatsapp"));
        assert_eq!(first_format, PackageFormat::Apk);
        assert!(second.contains("/XAPK/com.whatsapp"));
    }

    #[test]
    fn test_candidates_pin_latest_version() {
        for (url, _) in candidate_urls("com.whatsapp", false) {
            assert!(url.ends_with("?version=latest"));
        }
    }
}
