//! Product API client
//!
//! A thin collaborator around the storefront's REST backend: one synchronous
//! (in effect) GET per product, with the response contract asserted on the
//! way in. Any violation aborts the calling scenario with a descriptive
//! cause.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{ApiError, Result};

// Some public product APIs reject clientless user agents outright
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// A product record as the backend reports it
///
/// Deserialization is permissive: fields beyond these three are ignored, so
/// backend additions do not break the harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend product id
    pub id: u64,
    /// Display title
    pub title: String,
    /// Unit price
    pub price: f64,
}

impl Product {
    /// Validate the schema constraints the harness relies on
    pub fn validate(&self) -> std::result::Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::InvalidBody(format!(
                "product {} has an empty title",
                self.id
            )));
        }
        if self.price < 0.0 {
            return Err(ApiError::InvalidBody(format!(
                "product {} has a negative price: {}",
                self.id, self.price
            )));
        }
        Ok(())
    }
}

/// Client for the product API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    response_limit: Duration,
}

impl ApiClient {
    /// Create a client for the given API root
    pub fn new(base_url: &str, response_limit: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| crate::error::Error::config(format!("api.base.url: {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(response_limit)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            http,
            base,
            response_limit,
        })
    }

    /// Fetch a product by id, asserting the response contract
    ///
    /// Asserts: HTTP 200, response time within the configured bound, body id
    /// equal to the requested id, non-empty title, non-negative price.
    #[instrument(skip(self))]
    pub async fn product_by_id(&self, id: u64) -> Result<Product> {
        let url = self
            .base
            .join(&format!("products/{id}"))
            .map_err(|e| crate::error::Error::config(format!("product URL: {e}")))?;

        info!("Fetching product {id} from {url}");
        let start = Instant::now();

        let response = self
            .http
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Request)?;

        let elapsed = start.elapsed();
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        if elapsed > self.response_limit {
            return Err(ApiError::SlowResponse {
                elapsed_ms: elapsed.as_millis() as u64,
                limit_ms: self.response_limit.as_millis() as u64,
            }
            .into());
        }

        let product: Product = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

        if product.id != id {
            return Err(ApiError::FieldMismatch {
                expected: format!("id {id}"),
                actual: format!("id {}", product.id),
            }
            .into());
        }
        product.validate()?;

        debug!(
            "Product {id} ok: `{}` at {} ({}ms)",
            product.title,
            product.price,
            elapsed.as_millis()
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_product_ignores_unknown_fields() {
        let json = r#"{
            "id": 4,
            "title": "Sample Jacket",
            "price": 55.99,
            "description": "ignored",
            "category": "ignored",
            "image": "ignored",
            "rating": { "rate": 2.1, "count": 430 }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 4);
        assert_eq!(product.title, "Sample Jacket");
        assert_eq!(product.price, 55.99);
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let product = Product {
            id: 4,
            title: "  ".to_string(),
            price: 1.0,
        };
        let err = product.validate().unwrap_err();
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let product = Product {
            id: 4,
            title: "Sample".to_string(),
            price: -0.01,
        };
        let err = product.validate().unwrap_err();
        assert!(err.to_string().contains("negative price"));
    }

    #[test]
    fn test_validate_accepts_free_product() {
        let product = Product {
            id: 7,
            title: "Sticker".to_string(),
            price: 0.0,
        };
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let err = ApiClient::new("not a url", Duration::from_secs(15)).unwrap_err();
        assert!(err.to_string().contains("api.base.url"));
    }
}
