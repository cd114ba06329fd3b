//! Catalog loading.
//!
//! The catalog is a static JSON document loaded once at start-up, either
//! from a configured path or from the seed embedded in the binary. The
//! engine never mutates it.

use std::path::Path;

use thiserror::Error;

use batra_creation_core::{Catalog, CatalogError, Product};

/// Seed catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Reading the catalog file failed.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document is not valid JSON.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The product list violates a catalog invariant.
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Load the catalog from `path`, or the embedded seed when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// violates a catalog invariant (duplicate ids, zero minimum order
/// quantities, non-positive prices).
pub fn load(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => EMBEDDED_CATALOG.to_owned(),
    };
    let products: Vec<Product> = serde_json::from_str(&raw)?;
    Ok(Catalog::new(products)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use batra_creation_core::ProductId;

    #[test]
    fn embedded_seed_loads() {
        let catalog = load(None).expect("embedded catalog is valid");
        assert_eq!(catalog.len(), 11);

        let dress = catalog.get(&ProductId::new("p8")).expect("p8 present");
        assert_eq!(dress.name, "White Chiffon Midi Dress");
        assert_eq!(dress.price.amount, 165);
        assert_eq!(dress.min_order_quantity, 50);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load(Some(Path::new("/nonexistent/catalog.json")));
        assert!(matches!(result, Err(CatalogLoadError::Io(_))));
    }
}
