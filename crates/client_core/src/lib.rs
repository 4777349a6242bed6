use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
    protocol::{HttpMethod, ProductRequest},
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub mod controller;
pub mod error;
pub mod store;
pub mod view_state;

pub use controller::{CatalogEvent, PendingRequest, ViewController};
pub use error::CatalogError;
pub use store::CatalogStore;
pub use view_state::{ActionButton, Intent, ViewState};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote products collection.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn create_product(&self, product: &Product) -> Result<Product, ApiError>;
    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError>;
    async fn update_product(&self, id: &ProductId, product: &Product)
        -> Result<Product, ApiError>;
}

pub struct HttpProductApi {
    http: Client,
    base_url: Url,
}

impl HttpProductApi {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) url".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CatalogError::Api(transport_error(err)))?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, request: &ProductRequest) -> Url {
        let mut url = self.base_url.clone();
        // http(s) urls always have a path to extend
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(request.path_segments());
        }
        url
    }

    async fn send(&self, request: &ProductRequest) -> Result<Response, ApiError> {
        let url = self.endpoint(request);
        let operation = request.operation();
        debug!(%operation, %url, "sending products request");

        let builder = match request.method() {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
            HttpMethod::Put => self.http.put(url),
            HttpMethod::Delete => self.http.delete(url),
        };
        let builder = match request.body() {
            Some(product) => builder.json(product),
            None => builder,
        };

        let res = builder.send().await.map_err(transport_error)?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::from_status(
                status.as_u16(),
                format!("{operation} returned {status}: {}", body.trim()),
            ));
        }
        Ok(res)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: &ProductRequest) -> Result<T, ApiError> {
        let res = self.send(request).await?;
        res.json::<T>()
            .await
            .map_err(|err| ApiError::new(ErrorCode::Decode, err.to_string()))
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    /// Entries that do not decode as products are logged and skipped so one
    /// bad record cannot hide the rest of the catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let entries: Vec<Value> = self.send_json(&ProductRequest::List).await?;
        let total = entries.len();
        let products: Vec<Product> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let id = entry.get("_id").or_else(|| entry.get("id")).cloned();
                serde_json::from_value(entry)
                    .map_err(|err| warn!(index, ?id, error = %err, "skipping malformed product"))
                    .ok()
            })
            .collect();
        if products.len() < total {
            warn!(
                skipped = total - products.len(),
                total, "listing contained malformed products"
            );
        }
        Ok(products)
    }

    async fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        self.send_json(&ProductRequest::Create {
            product: product.clone(),
        })
        .await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.send(&ProductRequest::Delete { id: id.clone() })
            .await
            .map(|_| ())
    }

    async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<Product, ApiError> {
        self.send_json(&ProductRequest::Update {
            id: id.clone(),
            product: product.clone(),
        })
        .await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if let Some(status) = err.status() {
        return ApiError::from_status(status.as_u16(), err.to_string());
    }
    let code = if err.is_decode() {
        ErrorCode::Decode
    } else {
        ErrorCode::Transport
    };
    ApiError::new(code, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
