// Catalog module - static, read-only list of playable tutorial entries
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Catalog shipped with the binary, used when no catalog file is given
const SAMPLE_CATALOG: &str = include_str!("sample_library.json");

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate entry id `{0}`")]
    DuplicateId(String),
}

/// One playable item in the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Human-readable duration, not derived from the media itself
    #[serde(rename = "duration", default)]
    pub duration_label: String,
    #[serde(rename = "thumbnailUrl", default)]
    pub poster_url: Option<String>,
    #[serde(rename = "videoUrl", default)]
    pub source_url: Option<String>,
}

/// Ordered, immutable collection of media entries
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(rename = "libraryTitle", default)]
    title: String,
    #[serde(rename = "libraryDescription", default)]
    description: String,
    #[serde(rename = "videos", default)]
    entries: Vec<MediaEntry>,
}

impl Catalog {
    /// Build a catalog from entries, rejecting duplicate ids
    #[cfg(test)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        entries: Vec<MediaEntry>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            title: title.into(),
            description: description.into(),
            entries,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            "Loaded catalog {:?} with {} entries from {}",
            catalog.title,
            catalog.entries.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The catalog bundled with the application
    pub fn sample() -> Self {
        match Self::from_json(SAMPLE_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("Bundled catalog is invalid: {}", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaEntry> {
        self.entries.get(index)
    }

    /// Position of the entry with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

#[cfg(test)]
pub(crate) fn entry(id: &str, source_url: Option<&str>) -> MediaEntry {
    MediaEntry {
        id: id.to_string(),
        title: format!("Entry {id}"),
        description: String::new(),
        duration_label: "1:00".to_string(),
        poster_url: None,
        source_url: source_url.map(str::to_string),
    }
}
