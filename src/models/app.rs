use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    pub title: String,
    pub package_id: String,
    pub version: Option<String>,
    pub rating: Option<f32>,
    pub installs: Option<String>,
    pub genre: Option<String>,
    pub icon: Option<String>,
    pub developer: Option<String>,
}

impl AppMetadata {
    pub fn new(title: impl Into<String>, package_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            package_id: package_id.into(),
            version: None,
            rating: None,
            installs: None,
            genre: None,
            icon: None,
            developer: None,
        }
    }

    /// Games usually ship expansion data, so XAPK bundles are preferred for them.
    pub fn is_game(&self) -> bool {
        match &self.genre {
            Some(genre) => genre.to_lowercase().contains("game") || genre.contains("ألعاب"),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub package_id: String,
    pub title: Option<String>,
}
