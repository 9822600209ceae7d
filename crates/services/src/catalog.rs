//! Loading the word catalog from its JSON source.

use std::path::Path;

use tracing::info;
use vocab_core::model::{Word, WordCatalog};

use crate::error::CatalogLoadError;

/// Parse a JSON array of word records into a validated catalog.
///
/// # Errors
///
/// Returns `CatalogLoadError::Parse` for malformed JSON or unknown levels and
/// `CatalogLoadError::Invalid` for blank or duplicate words.
pub fn parse_catalog(json: &str) -> Result<WordCatalog, CatalogLoadError> {
    let words: Vec<Word> = serde_json::from_str(json)?;
    Ok(WordCatalog::new(words)?)
}

/// Read and parse the catalog file at `path`.
///
/// # Errors
///
/// Returns `CatalogLoadError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_catalog`].
pub fn load_catalog(path: &Path) -> Result<WordCatalog, CatalogLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&raw)?;
    info!(words = catalog.len(), path = %path.display(), "loaded word catalog");
    Ok(catalog)
}
