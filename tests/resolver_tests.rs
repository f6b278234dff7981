use anyhow::Result;
use apkfetch::catalog::{self, Catalog, SEARCH_LIMIT};
use apkfetch::fallback::Locale;
use apkfetch::models::{AppMetadata, SearchHit};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Copy)]
enum Reply {
    Hit,
    Miss,
    Fault,
}

/// Catalog double: scripted per-locale replies plus a call log, so tests can
/// assert which strategies ran and in what order.
struct StubCatalog {
    calls: Mutex<Vec<String>>,
    lookups: HashMap<String, Reply>,
    searches: HashMap<String, Reply>,
}

impl StubCatalog {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            lookups: HashMap::new(),
            searches: HashMap::new(),
        }
    }

    fn lookup_reply(mut self, locale: &str, reply: Reply) -> Self {
        self.lookups.insert(locale.to_string(), reply);
        self
    }

    fn search_reply(mut self, locale: &str, reply: Reply) -> Self {
        self.searches.insert(locale.to_string(), reply);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }
}

#[async_trait]
impl Catalog for StubCatalog {
    async fn lookup(&self, package_id: &str, locale: &Locale) -> Result<Option<AppMetadata>> {
        self.calls
            .lock()
            .expect("call log")
            .push(format!("lookup {} {}", package_id, locale));

        match self
            .lookups
            .get(&locale.to_string())
            .copied()
            .unwrap_or(Reply::Miss)
        {
            Reply::Hit => Ok(Some(AppMetadata::new("Stub App", package_id))),
            Reply::Miss => Ok(None),
            Reply::Fault => Err(anyhow::anyhow!("catalog unreachable")),
        }
    }

    async fn search(&self, query: &str, locale: &Locale, limit: usize) -> Result<Vec<SearchHit>> {
        assert_eq!(limit, SEARCH_LIMIT);
        self.calls
            .lock()
            .expect("call log")
            .push(format!("search {} {}", query, locale));

        match self
            .searches
            .get(&locale.to_string())
            .copied()
            .unwrap_or(Reply::Miss)
        {
            Reply::Hit => Ok(vec![
                SearchHit {
                    package_id: "com.found.app".to_string(),
                    title: Some("Found App".to_string()),
                },
                SearchHit {
                    package_id: "com.other.app".to_string(),
                    title: None,
                },
            ]),
            Reply::Miss => Ok(Vec::new()),
            Reply::Fault => Err(anyhow::anyhow!("search unavailable")),
        }
    }
}

#[tokio::test]
async fn test_package_id_query_never_searches() {
    let stub = StubCatalog::new().lookup_reply("ar-us", Reply::Hit);

    let meta = catalog::resolve(&stub, "com.whatsapp").await.expect("metadata");
    assert_eq!(meta.package_id, "com.whatsapp");

    assert_eq!(stub.calls(), vec!["lookup com.whatsapp ar-us"]);
}

#[tokio::test]
async fn test_package_id_query_falls_back_to_english() {
    let stub = StubCatalog::new()
        .lookup_reply("ar-us", Reply::Fault)
        .lookup_reply("en-us", Reply::Hit);

    let meta = catalog::resolve(&stub, "com.whatsapp").await.expect("metadata");
    assert_eq!(meta.package_id, "com.whatsapp");

    assert_eq!(
        stub.calls(),
        vec!["lookup com.whatsapp ar-us", "lookup com.whatsapp en-us"]
    );
}

#[tokio::test]
async fn test_package_id_query_not_found_when_chain_exhausted() {
    let stub = StubCatalog::new();

    assert!(catalog::resolve(&stub, "com.nonexistent.app").await.is_none());
    assert_eq!(stub.calls().len(), 2);
}

#[tokio::test]
async fn test_free_text_walks_search_strategies_in_order() {
    let stub = StubCatalog::new()
        .search_reply("ar-sa", Reply::Fault)
        .search_reply("ar-ae", Reply::Miss)
        .search_reply("ar-eg", Reply::Hit)
        .lookup_reply("ar-sa", Reply::Hit);

    let meta = catalog::resolve(&stub, "ببجي").await.expect("metadata");
    assert_eq!(meta.package_id, "com.found.app");

    assert_eq!(
        stub.calls(),
        vec![
            "search ببجي ar-sa",
            "search ببجي ar-ae",
            "search ببجي ar-eg",
            "lookup com.found.app ar-sa",
        ]
    );
}

#[tokio::test]
async fn test_free_text_takes_first_hit_of_first_non_empty_result() {
    let stub = StubCatalog::new()
        .search_reply("ar-sa", Reply::Hit)
        .lookup_reply("ar-sa", Reply::Hit);

    let meta = catalog::resolve(&stub, "whats app").await.expect("metadata");
    assert_eq!(meta.package_id, "com.found.app");
}

#[tokio::test]
async fn test_free_text_refine_chain_order() {
    let stub = StubCatalog::new()
        .search_reply("ar-sa", Reply::Hit)
        .lookup_reply("ar-sa", Reply::Fault)
        .lookup_reply("ar-us", Reply::Miss)
        .lookup_reply("en-us", Reply::Hit);

    let meta = catalog::resolve(&stub, "telegram").await.expect("metadata");
    assert_eq!(meta.package_id, "com.found.app");

    assert_eq!(
        stub.calls(),
        vec![
            "search telegram ar-sa",
            "lookup com.found.app ar-sa",
            "lookup com.found.app ar-us",
            "lookup com.found.app en-us",
        ]
    );
}

#[tokio::test]
async fn test_free_text_faults_never_propagate() {
    let mut stub = StubCatalog::new();
    for locale in ["ar-sa", "ar-ae", "ar-eg", "ar-us", "en-us", "en-gb"] {
        stub = stub.search_reply(locale, Reply::Fault);
    }

    assert!(catalog::resolve(&stub, "واتساب").await.is_none());
    assert_eq!(stub.calls().len(), 6);
}
