use super::*;

fn product_json() -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "name": "Chai",
        "sku": "PRD-CHAI-0042",
        "description": "10 boxes x 20 bags",
        "quantity_per_unit": "1 box of 10",
        "units_in_stock": 39,
        "units_on_order": 0,
        "discontinued": false,
        "price": 9.99,
        "available": true,
        "category_id": 1,
        "created_by_user_id": 7,
        "created_at": "2024-01-15T10:30:00",
        "updated_at": null
    })
}

// =============================================================================
// Product
// =============================================================================

#[test]
fn product_deserializes_backend_shape() {
    let product: Product = serde_json::from_value(product_json()).unwrap();
    assert_eq!(product.id, 42);
    assert_eq!(product.sku, "PRD-CHAI-0042");
    assert_eq!(product.price, Decimal::new(999, 2));
    assert_eq!(product.units_in_stock, 39);
    assert!(product.available);
    assert_eq!(product.updated_at, None);
}

#[test]
fn product_accepts_null_optionals() {
    let mut json = product_json();
    json["description"] = serde_json::Value::Null;
    json["quantity_per_unit"] = serde_json::Value::Null;
    json["category_id"] = serde_json::Value::Null;
    json["created_by_user_id"] = serde_json::Value::Null;
    let product: Product = serde_json::from_value(json).unwrap();
    assert_eq!(product.description, None);
    assert_eq!(product.category_id, None);
}

#[test]
fn product_parses_fractional_seconds_timestamp() {
    let mut json = product_json();
    json["created_at"] = serde_json::Value::String("2024-01-15T10:30:00.123456".into());
    let product: Product = serde_json::from_value(json).unwrap();
    assert_eq!(product.created_at.and_utc().timestamp_subsec_micros(), 123_456);
}

// =============================================================================
// ProductsQuery
// =============================================================================

#[test]
fn query_omits_absent_fields() {
    let query = ProductsQuery { page: Some(1), per_page: Some(10), ..ProductsQuery::default() };
    let value = serde_json::to_value(&query).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains_key("page"));
    assert!(object.contains_key("per_page"));
    assert!(!object.contains_key("name"));
    assert!(!object.contains_key("available"));
}

#[test]
fn query_default_serializes_empty() {
    let value = serde_json::to_value(ProductsQuery::default()).unwrap();
    assert!(value.as_object().unwrap().is_empty());
}

#[test]
fn query_includes_all_set_filters() {
    let query = ProductsQuery {
        page: Some(2),
        per_page: Some(25),
        name: Some("chai".into()),
        category_id: Some(3),
        available: Some(true),
        discontinued: Some(false),
        min_price: Some(Decimal::new(100, 2)),
        max_price: Some(Decimal::new(5000, 2)),
    };
    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 8);
    assert_eq!(value["discontinued"], serde_json::Value::Bool(false));
}

// =============================================================================
// ProductsResponse
// =============================================================================

fn page_response(page: u32, items: Vec<Product>) -> ProductsResponse {
    ProductsResponse { items, page, per_page: 10, total_items: 25, total_pages: 3 }
}

#[test]
fn response_exposes_server_pagination_math() {
    // 25 items at 10 per page: the server reports ceil(25 / 10) = 3 pages.
    let json = serde_json::json!({
        "items": [],
        "page": 1,
        "per_page": 10,
        "total_items": 25,
        "total_pages": 3
    });
    let response: ProductsResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.total_pages, 3);
    assert_eq!(response.total_items, 25);
}

#[test]
fn trailing_empty_page_is_guarded_not_fatal() {
    let response = page_response(4, Vec::new());
    assert!(response.is_past_end());
    assert!(response.items.first().is_none());
}

#[test]
fn populated_page_is_not_past_end() {
    let product: Product = serde_json::from_value(product_json()).unwrap();
    let response = page_response(1, vec![product]);
    assert!(!response.is_past_end());
}

#[test]
fn empty_page_within_range_is_not_past_end() {
    // An in-range page with no items (e.g. a filter with no matches on page 1).
    let response = ProductsResponse { items: Vec::new(), page: 1, per_page: 10, total_items: 0, total_pages: 0 };
    assert!(!response.is_past_end());
}

// =============================================================================
// Token / Category
// =============================================================================

#[test]
fn token_round_trips() {
    let json = r#"{"access_token": "abc123", "token_type": "bearer"}"#;
    let token: Token = serde_json::from_str(json).unwrap();
    assert_eq!(token.access_token, "abc123");
    assert_eq!(token.token_type, "bearer");
}

#[test]
fn category_deserializes_with_null_optionals() {
    let json = serde_json::json!({
        "id": 1,
        "name": "Beverages",
        "slug": "beverages",
        "description": null,
        "picture_url": null,
        "created_at": "2024-01-01T00:00:00",
        "updated_at": null
    });
    let category: Category = serde_json::from_value(json).unwrap();
    assert_eq!(category.name, "Beverages");
    assert_eq!(category.slug.as_deref(), Some("beverages"));
    assert_eq!(category.picture_url, None);
}
