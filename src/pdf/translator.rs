use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::ServiceError;

/// Looks up the display text of a message key.
pub trait Translator: Send + Sync {
    /// Never fails: an unknown key translates to itself.
    fn translate(&self, key: &str) -> String;
}

/// Flat `{"key": "text"}` catalog loaded from `<dir>/<locale>.json`.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    locale: String,
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Catalog without entries; every key translates to itself.
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    /// A missing catalog file yields an empty catalog, a malformed one an error.
    #[instrument]
    pub fn load(dir: &Path, locale: &str) -> Result<Self, ServiceError> {
        let path = dir.join(format!("{}.json", locale));
        if !path.is_file() {
            debug!(path = %path.display(), "no translation catalog, using message keys");
            return Ok(Self::empty(locale));
        }

        let raw = fs::read_to_string(&path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&raw)?;
        debug!(entries = entries.len(), "translation catalog loaded");
        Ok(Self {
            locale: locale.to_string(),
            entries,
        })
    }

    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
