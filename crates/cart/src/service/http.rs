//! `reqwest` implementation of [`CartService`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use techstore_core::{CartSnapshot, ProductId, Quantity};
use tracing::{debug, instrument};
use url::Url;

use super::CartService;
use super::types::{
    AddedToCart, BuyNowAccepted, CartListResponse, ErrorResponse, ProductRequest, SyncRequest,
};
use crate::credentials::CredentialProvider;
use crate::error::ServiceError;

const LIST_PATH: &str = "api/cart/list/";
const SYNC_PATH: &str = "api/cart/sync/";
const ADD_PATH: &str = "api/cart/add/";
const BUY_NOW_PATH: &str = "api/buy-now/";
const CLEAR_PATH: &str = "api/cart/clear/";

/// Header carrying the CSRF token on state-changing requests.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Maximum number of response body characters kept in logs.
const LOG_BODY_CHARS: usize = 500;

/// Cart API client over HTTP.
#[derive(Clone)]
pub struct HttpCartService {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpCartService {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(
        mut base_url: Url,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        // Endpoint paths are relative, so a base path must end in a slash to be kept
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ServiceError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ServiceError::NetworkUnavailable(format!("Invalid endpoint {path}: {e}")))?;

        let mut builder = self.client.request(method.clone(), url);

        if let Some(cookie) = self.credentials.cookie_header() {
            builder = builder.header(reqwest::header::COOKIE, cookie.expose_secret());
        }

        if method != Method::GET
            && let Some(token) = self.credentials.csrf_token()
        {
            builder = builder.header(CSRF_HEADER, token.expose_secret());
        }

        Ok(builder)
    }

    /// Send a request and return the raw body of a successful response.
    async fn send(&self, builder: RequestBuilder) -> Result<String, ServiceError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ServiceError::Unauthenticated);
        }

        let body = response.text().await?;

        if !status.is_success() {
            debug!(
                status = %status,
                body = %body.chars().take(LOG_BODY_CHARS).collect::<String>(),
                "Cart API returned non-success status"
            );
            // A non-JSON error page is still a server rejection, not a failed
            // request, so it gets the generic failure message
            let error: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            return Err(ServiceError::ServerRejected {
                status,
                message: error.error,
                requires_login: error.requires_login,
            });
        }

        Ok(body)
    }

    /// Send a request and decode the JSON body of a successful response.
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(
                error = %e,
                body = %body.chars().take(LOG_BODY_CHARS).collect::<String>(),
                "Failed to parse cart API response"
            );
            ServiceError::NetworkUnavailable(format!("Malformed response body: {e}"))
        })
    }
}

impl std::fmt::Debug for HttpCartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCartService")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CartService for HttpCartService {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<CartSnapshot, ServiceError> {
        let builder = self.request(Method::GET, LIST_PATH)?;
        let response: CartListResponse = self.send_json(builder).await?;
        Ok(response.items.into())
    }

    #[instrument(skip(self, cart), fields(lines = cart.len()))]
    async fn sync(&self, cart: &CartSnapshot) -> Result<(), ServiceError> {
        let builder = self
            .request(Method::POST, SYNC_PATH)?
            .json(&SyncRequest { cart });
        self.send(builder).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    async fn add(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<AddedToCart, ServiceError> {
        let builder = self
            .request(Method::POST, ADD_PATH)?
            .json(&ProductRequest {
                product_id,
                quantity,
            });
        self.send_json(builder).await
    }

    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    async fn buy_now(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<BuyNowAccepted, ServiceError> {
        let builder = self
            .request(Method::POST, BUY_NOW_PATH)?
            .json(&ProductRequest {
                product_id,
                quantity,
            });
        self.send_json(builder).await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<(), ServiceError> {
        let builder = self.request(Method::POST, CLEAR_PATH)?;
        self.send(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentials;

    fn service(base: &str) -> HttpCartService {
        HttpCartService::new(
            Url::parse(base).unwrap(),
            Arc::new(StaticCredentials::anonymous()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let svc = service("http://localhost:8000/shop");
        assert_eq!(svc.base_url().as_str(), "http://localhost:8000/shop/");

        let url = svc.base_url().join(LIST_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/shop/api/cart/list/");
    }

    #[test]
    fn test_root_base_url() {
        let svc = service("http://localhost:8000");
        let url = svc.base_url().join(BUY_NOW_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/buy-now/");
    }
}
