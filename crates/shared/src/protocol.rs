use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Product, ProductId};

/// Path segments of the products collection, relative to the API base URL.
pub const PRODUCTS_COLLECTION: [&str; 2] = ["api", "products"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductOperation {
    List,
    Create,
    Delete,
    Update,
}

impl ProductOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductOperation::List => "list_products",
            ProductOperation::Create => "create_product",
            ProductOperation::Delete => "delete_product",
            ProductOperation::Update => "update_product",
        }
    }
}

impl fmt::Display for ProductOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four calls the storefront makes against the products collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRequest {
    List,
    Create { product: Product },
    Delete { id: ProductId },
    Update { id: ProductId, product: Product },
}

impl ProductRequest {
    pub fn operation(&self) -> ProductOperation {
        match self {
            ProductRequest::List => ProductOperation::List,
            ProductRequest::Create { .. } => ProductOperation::Create,
            ProductRequest::Delete { .. } => ProductOperation::Delete,
            ProductRequest::Update { .. } => ProductOperation::Update,
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            ProductRequest::List => HttpMethod::Get,
            ProductRequest::Create { .. } => HttpMethod::Post,
            ProductRequest::Delete { .. } => HttpMethod::Delete,
            ProductRequest::Update { .. } => HttpMethod::Put,
        }
    }

    /// Path segments below the API base URL, unescaped.
    pub fn path_segments(&self) -> Vec<&str> {
        let mut segments = PRODUCTS_COLLECTION.to_vec();
        match self {
            ProductRequest::Delete { id } | ProductRequest::Update { id, .. } => {
                segments.push(id.as_str());
            }
            ProductRequest::List | ProductRequest::Create { .. } => {}
        }
        segments
    }

    pub fn body(&self) -> Option<&Product> {
        match self {
            ProductRequest::Create { product } | ProductRequest::Update { product, .. } => {
                Some(product)
            }
            ProductRequest::List | ProductRequest::Delete { .. } => None,
        }
    }
}
