use shared::{domain::ProductId, error::ApiError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product {0} not found in catalog")]
    NotFound(ProductId),
    #[error("cannot {intent} while {state}")]
    InvalidTransition {
        intent: &'static str,
        state: &'static str,
    },
    #[error("selected product has no id")]
    MissingId,
    #[error("invalid API base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}
