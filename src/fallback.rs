use anyhow::Result;
use futures_util::future::BoxFuture;
use std::fmt;

/// A (language, country) pair sent to the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub lang: &'static str,
    pub country: &'static str,
}

impl Locale {
    pub const fn new(lang: &'static str, country: &'static str) -> Self {
        Self { lang, country }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lang, self.country)
    }
}

/// Locales tried for a direct package-id lookup, most preferred first.
pub const DIRECT_LOOKUP: &[Locale] = &[Locale::new("ar", "us"), Locale::new("en", "us")];

/// Locales tried for a free-text search. Arabic storefronts come first since
/// queries are expected to be Arabic more often than not.
pub const SEARCH_STRATEGIES: &[Locale] = &[
    Locale::new("ar", "sa"),
    Locale::new("ar", "ae"),
    Locale::new("ar", "eg"),
    Locale::new("ar", "us"),
    Locale::new("en", "us"),
    Locale::new("en", "gb"),
];

/// Locales tried when re-resolving full metadata for a search hit.
pub const REFINE_LOOKUP: &[Locale] = &[
    Locale::new("ar", "sa"),
    Locale::new("ar", "us"),
    Locale::new("en", "us"),
];

/// Runs attempts in order and returns the first hit. `Ok(None)` means the
/// strategy legitimately found nothing; `Err` means it crashed. Both advance
/// the chain: a flaky strategy must never block the ones after it.
pub async fn first_hit<'a, T>(
    attempts: impl IntoIterator<Item = BoxFuture<'a, Result<Option<T>>>>,
) -> Option<T> {
    for attempt in attempts {
        match attempt.await {
            Ok(Some(value)) => return Some(value),
            Ok(None) | Err(_) => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[tokio::test]
    async fn test_first_hit_skips_misses_and_faults() {
        let attempts: Vec<BoxFuture<'static, Result<Option<u32>>>> = vec![
            async { Err(anyhow::anyhow!("mirror down")) }.boxed(),
            async { Ok(None) }.boxed(),
            async { Ok(Some(7)) }.boxed(),
        ];

        assert_eq!(first_hit(attempts).await, Some(7));
    }

    #[tokio::test]
    async fn test_first_hit_stops_at_first_hit() {
        let attempts: Vec<BoxFuture<'static, Result<Option<u32>>>> = vec![
            async { Ok(Some(1)) }.boxed(),
            async { Ok(Some(2)) }.boxed(),
        ];

        assert_eq!(first_hit(attempts).await, Some(1));
    }

    #[tokio::test]
    async fn test_first_hit_exhausted_chain_is_none() {
        let attempts: Vec<BoxFuture<'static, Result<Option<u32>>>> = vec![
            async { Ok(None) }.boxed(),
            async { Err(anyhow::anyhow!("timeout")) }.boxed(),
        ];

        assert_eq!(first_hit(attempts).await, None);
    }

    #[test]
    fn test_search_strategy_order() {
        let order: Vec<String> = SEARCH_STRATEGIES.iter().map(Locale::to_string).collect();
        assert_eq!(
            order,
            ["ar-sa", "ar-ae", "ar-eg", "ar-us", "en-us", "en-gb"]
        );
    }
}
