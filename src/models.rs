//! Wire types exchanged with the catalog backend.
//!
//! DESIGN
//! ======
//! Records mirror the backend's shapes one-to-one; the client never mutates
//! an entity in place. Create flows submit a request type and receive a
//! fresh server representation back. Input types carry their `validator`
//! schemas so malformed data is rejected before it reaches the wire.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// AUTH
// =============================================================================

/// Login credentials. Ephemeral: built per attempt, discarded after use.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Bearer token pair issued by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// Full product record as the server returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Server-derived identifier. The create request submits `slug`, never
    /// `sku`; the client does not predict or invent this value.
    pub sku: String,
    pub description: Option<String>,
    pub quantity_per_unit: Option<String>,
    pub units_in_stock: i32,
    pub units_on_order: i32,
    pub discontinued: bool,
    pub price: Decimal,
    /// Opaque server-provided flag; never derived client-side from
    /// `units_in_stock` or `discontinued`.
    pub available: bool,
    pub category_id: Option<i64>,
    pub created_by_user_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Payload for creating a product. Submitted as multipart form data.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductCreateRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    /// Human-readable URL-safe identifier; the server derives `sku` from it.
    #[validate(length(max = 100, message = "slug must be at most 100 characters"))]
    pub slug: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "crate::validate::price_is_positive"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i64,
    #[validate(range(min = 1, message = "category_id must be a positive integer"))]
    pub category_id: Option<i64>,
}

/// Server-side filtering and pagination for the products listing.
/// Absent fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discontinued: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
}

/// One page-window of the products listing. Pagination math
/// (`total_pages = ceil(total_items / per_page)`) is server-owned; the
/// client only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub items: Vec<Product>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl ProductsResponse {
    /// True when the requested page lies past the last populated one.
    /// Trailing empty pages are legal server responses and must not crash
    /// the consumer; this guard lets it render "no results" instead.
    #[must_use]
    pub fn is_past_end(&self) -> bool {
        self.items.is_empty() && self.page > self.total_pages
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// Category record as the server returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Optional binary picture attachment for a category.
#[derive(Debug, Clone)]
pub struct PicturePayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for creating a category. Submitted as multipart form data,
/// the picture as a binary part when present.
#[derive(Debug, Clone, Default, Validate)]
pub struct CategoryCreateRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "slug must be at most 100 characters"))]
    pub slug: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub picture: Option<PicturePayload>,
}

/// Field-keyed validation messages, ordered for stable rendering.
pub type FieldErrors = BTreeMap<String, String>;

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
