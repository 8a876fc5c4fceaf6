//! Catalog API client.
//!
//! ARCHITECTURE
//! ============
//! Single point of contact for the backend. Two behaviors wrap every call:
//! - Outbound: the stored token is read at dispatch time and attached as a
//!   bearer credential when present. No token means the request goes out
//!   unauthenticated; the backend is the final arbiter of rejection.
//! - Inbound: a 401 on any non-login call clears the token store and
//!   broadcasts [`SessionEvent::Invalidated`] before the error propagates,
//!   regardless of which operation triggered it. The login endpoint is the
//!   one exception: rejected credentials are an [`ApiError::Authentication`]
//!   with no store side effect.
//!
//! TRADE-OFFS
//! ==========
//! Each call is attempted exactly once; retry policy belongs to the caller
//! (`ApiError::retryable` says which failures are worth it).

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use crate::config::ClientConfig;
use crate::error::{self, ApiError};
use crate::models::{
    Category, CategoryCreateRequest, Credentials, Product, ProductCreateRequest, ProductsQuery, ProductsResponse,
    Token,
};
use crate::token::TokenStore;
use crate::validate;

/// Buffered invalidation events before slow subscribers start lagging.
pub const SESSION_EVENT_CAPACITY: usize = 16;

/// Session-level side effects announced by the client. Subscribers (the
/// session controller, UI guards) react; the client itself never touches
/// navigation or view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A non-login call was rejected as unauthorized; the stored token has
    /// been cleared.
    Invalidated,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Build a client over the given token store.
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string(), store, events })
    }

    /// Subscribe to session-level side effects.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Exchange credentials for a token. Credentials go out URL-encoded,
    /// not as JSON. A 401 here means rejected credentials, not an expired
    /// session: the store is left untouched and nothing is broadcast.
    pub async fn login(&self, credentials: &Credentials) -> Result<Token, ApiError> {
        validate::check(credentials)?;
        let url = format!("{}/auth/token", self.base_url);
        tracing::debug!(%url, "login request");
        let fields = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response = self.http.post(url).form(&fields).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Authentication { message: error::extract_detail(&body) });
        }
        if !status.is_success() {
            return Err(error::classify_status(status.as_u16(), &body));
        }
        decode(&body)
    }

    // =========================================================================
    // PRODUCTS
    // =========================================================================

    /// Paginated, filtered product listing. Absent query fields are omitted
    /// from the request entirely, never sent as empty or null.
    pub async fn list_products(&self, query: &ProductsQuery) -> Result<ProductsResponse, ApiError> {
        let request = self.request(Method::GET, "/products").query(query);
        self.execute(request, "products").await
    }

    /// Create a product via multipart form data. `name`, `price` and
    /// `stock` are always included; `slug`, `description` and `category_id`
    /// only when present and non-empty.
    pub async fn create_product(&self, payload: &ProductCreateRequest) -> Result<Product, ApiError> {
        validate::check(payload)?;
        let mut form = reqwest::multipart::Form::new()
            .text("name", payload.name.clone())
            .text("price", payload.price.to_string())
            .text("stock", payload.stock.to_string());
        if let Some(slug) = non_empty(payload.slug.as_deref()) {
            form = form.text("slug", slug);
        }
        if let Some(description) = non_empty(payload.description.as_deref()) {
            form = form.text("description", description);
        }
        if let Some(category_id) = payload.category_id {
            form = form.text("category_id", category_id.to_string());
        }
        let request = self.request(Method::POST, "/products").multipart(form);
        self.execute(request, "product").await
    }

    /// Product update has no backend endpoint; fail loudly rather than
    /// pretending to save.
    pub fn update_product(&self, _id: i64, _payload: &ProductCreateRequest) -> Result<Product, ApiError> {
        Err(ApiError::NotAvailable { operation: "product update" })
    }

    // =========================================================================
    // CATEGORIES
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.request(Method::GET, "/categories");
        self.execute(request, "categories").await
    }

    /// Fetch one category; 404 maps to [`ApiError::NotFound`].
    pub async fn get_category(&self, id: i64) -> Result<Category, ApiError> {
        let request = self.request(Method::GET, &format!("/categories/{id}"));
        self.execute(request, "category").await
    }

    /// Create a category via multipart form data, attaching the picture as
    /// a binary part when present.
    pub async fn create_category(&self, payload: &CategoryCreateRequest) -> Result<Category, ApiError> {
        validate::check(payload)?;
        let mut form = reqwest::multipart::Form::new().text("name", payload.name.clone());
        if let Some(slug) = non_empty(payload.slug.as_deref()) {
            form = form.text("slug", slug);
        }
        if let Some(description) = non_empty(payload.description.as_deref()) {
            form = form.text("description", description);
        }
        if let Some(picture) = &payload.picture {
            let part = reqwest::multipart::Part::bytes(picture.bytes.clone())
                .file_name(picture.file_name.clone())
                .mime_str(&picture.content_type)
                .map_err(|_| ApiError::Validation {
                    errors: [("picture".to_string(), format!("invalid content type: {}", picture.content_type))]
                        .into_iter()
                        .collect(),
                })?;
            form = form.part("picture", part);
        }
        let request = self.request(Method::POST, "/categories").multipart(form);
        self.execute(request, "category").await
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Start a request with the bearer token attached when one is stored.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.store.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send, apply the unauthorized side effect, and decode the body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_session();
            return Err(ApiError::SessionExpired);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { resource: resource.to_string() });
        }
        if !status.is_success() {
            return Err(error::classify_status(status.as_u16(), &body));
        }
        decode(&body)
    }

    /// Unconditional reaction to an unauthorized response: empty the token
    /// slot, then announce it. Fires once per 401 response.
    fn invalidate_session(&self) {
        self.store.clear();
        tracing::warn!("unauthorized response: cleared stored token");
        // Send only errors when nobody is subscribed, which is fine.
        let _ = self.events.send(SessionEvent::Invalidated);
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Treat empty strings like absent fields, matching the form layer where
/// an untouched input submits `""`.
fn non_empty(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
