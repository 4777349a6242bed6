//! Local cache of the products collection.

use std::collections::HashSet;

use shared::domain::{Product, ProductId};
use tracing::warn;

use crate::error::CatalogError;

/// Products in server order, unique by id.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        let mut store = Self::new();
        store.replace_all(products);
        store
    }

    /// Replaces every entry. Server order is kept; a repeated id keeps its
    /// first occurrence.
    pub fn replace_all(&mut self, mut products: Vec<Product>) {
        let mut seen = HashSet::new();
        products.retain(|product| match &product.id {
            Some(id) if !seen.insert(id.clone()) => {
                warn!(product_id = %id, "dropping duplicate product from catalog listing");
                false
            }
            _ => true,
        });
        self.products = products;
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.has_id(id))
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sells one unit locally. The new quantity is not pushed to the API.
    pub fn decrement_availability(&mut self, id: &ProductId) -> Result<&Product, CatalogError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.has_id(id))
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        product.quantity = product.quantity.decremented();
        Ok(&*product)
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|product| product.has_id(id))?;
        Some(self.products.remove(index))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
