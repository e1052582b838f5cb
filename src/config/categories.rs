//! Item category loading
//!
//! Categories come from a small document with a single `categories` list:
//!
//! ```json
//! { "categories": ["BOOKS", "FOOD", "TRAVEL"] }
//! ```
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, everything else as
//! JSON. Loading happens once at start-up and any problem is fatal.

use std::path::Path;

use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::CategorySet;

#[derive(Debug, Deserialize)]
struct CategoryDocument {
    categories: Option<Vec<String>>,
}

/// Load the permitted item categories from `path`
pub fn load_categories(path: &Path) -> LedgerResult<CategorySet> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        LedgerError::Config(format!(
            "Failed to read categories file {}: {}",
            path.display(),
            e
        ))
    })?;

    let set = parse_categories(&contents, is_yaml(path)).map_err(|e| match e {
        LedgerError::Config(msg) => {
            LedgerError::Config(format!("{} ({})", msg, path.display()))
        }
        other => other,
    })?;

    tracing::debug!(path = %path.display(), count = set.len(), "Loaded item categories");
    Ok(set)
}

/// Parse a category document already read into memory
pub fn parse_categories(contents: &str, yaml: bool) -> LedgerResult<CategorySet> {
    let document: CategoryDocument = if yaml {
        serde_yaml::from_str(contents)
            .map_err(|e| LedgerError::Config(format!("Malformed categories document: {}", e)))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| LedgerError::Config(format!("Malformed categories document: {}", e)))?
    };

    let names = document.categories.ok_or_else(|| {
        LedgerError::Config("Categories document has no 'categories' key".into())
    })?;

    Ok(CategorySet::new(names))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
