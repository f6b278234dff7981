pub mod play;

use crate::fallback::{first_hit, Locale, DIRECT_LOOKUP, REFINE_LOOKUP, SEARCH_STRATEGIES};
use crate::input::{classify, QueryKind};
use crate::models::{AppMetadata, SearchHit};
use anyhow::Result;
use async_trait::async_trait;
use futures_util::FutureExt;

pub use play::PlayCatalog;

/// How many hits a single search strategy may return.
pub const SEARCH_LIMIT: usize = 10;

/// The app-store catalog boundary. `Ok(None)` / an empty vec mean the app was
/// not found for that locale; `Err` is a transport or parse fault.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn lookup(&self, package_id: &str, locale: &Locale) -> Result<Option<AppMetadata>>;

    async fn search(
        &self,
        query: &str,
        locale: &Locale,
        limit: usize,
    ) -> Result<Vec<SearchHit>>;
}

/// Resolves a user query to full app metadata.
///
/// Package-id queries go straight to lookup and never touch search. Free-text
/// queries walk the search locales in order, stop at the first non-empty
/// result set, and re-resolve the top hit's package id. Individual strategy
/// faults are swallowed; only an exhausted chain yields `None`.
pub async fn resolve(catalog: &dyn Catalog, query: &str) -> Option<AppMetadata> {
    let query = query.trim();

    match classify(query) {
        QueryKind::PackageId => lookup_first(catalog, query, DIRECT_LOOKUP).await,
        QueryKind::FreeText => {
            let hits = search_first(catalog, query).await?;
            let best = hits.into_iter().next()?;
            lookup_first(catalog, &best.package_id, REFINE_LOOKUP).await
        }
    }
}

async fn lookup_first(
    catalog: &dyn Catalog,
    package_id: &str,
    locales: &[Locale],
) -> Option<AppMetadata> {
    first_hit(
        locales
            .iter()
            .map(|locale| catalog.lookup(package_id, locale)),
    )
    .await
}

async fn search_first(catalog: &dyn Catalog, query: &str) -> Option<Vec<SearchHit>> {
    first_hit(SEARCH_STRATEGIES.iter().map(|locale| {
        async move {
            let hits = catalog.search(query, locale, SEARCH_LIMIT).await?;
            Ok(if hits.is_empty() { None } else { Some(hits) })
        }
        .boxed()
    }))
    .await
}
