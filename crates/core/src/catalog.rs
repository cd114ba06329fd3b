//! Immutable product catalog.
//!
//! The catalog is supplied once at start-up and never mutated by the engine.
//! Products carry a wholesale minimum order quantity alongside the usual
//! display attributes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// A single catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (e.g. "Chiffon Dress").
    pub category: String,
    /// Wholesale unit price.
    pub price: Price,
    /// Image URL for display.
    pub image: String,
    /// Short description.
    pub description: String,
    /// Minimum quantity for the first add of this product to a cart.
    pub min_order_quantity: u32,
}

/// Errors raised while assembling a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product declared a zero minimum order quantity.
    #[error("product {0} has a zero minimum order quantity")]
    ZeroMinOrderQuantity(ProductId),

    /// A product declared a non-positive unit price.
    #[error("product {0} has a non-positive price")]
    NonPositivePrice(ProductId),
}

/// Ordered, id-unique collection of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids, zero minimum order quantities, or
    /// non-positive prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.min_order_quantity == 0 {
                return Err(CatalogError::ZeroMinOrderQuantity(product.id.clone()));
            }
            if product.price.amount <= 0 {
                return Err(CatalogError::NonPositivePrice(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::{chiffon_dress, tshirt};
    use super::*;

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::new(vec![chiffon_dress(), tshirt()]).expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        let found = catalog.get(&ProductId::new("p2")).expect("present");
        assert_eq!(found.name, "Casual Ladies T-Shirt");
        assert!(catalog.get(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(vec![chiffon_dress(), chiffon_dress()]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn zero_moq_is_rejected() {
        let mut product = tshirt();
        product.min_order_quantity = 0;
        let result = Catalog::new(vec![product]);
        assert!(matches!(result, Err(CatalogError::ZeroMinOrderQuantity(_))));
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut product = tshirt();
        product.price.amount = 0;
        let result = Catalog::new(vec![product]);
        assert!(matches!(result, Err(CatalogError::NonPositivePrice(_))));
    }
}
