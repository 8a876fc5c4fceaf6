use rust_decimal::Decimal;

use super::*;
use crate::models::{CategoryCreateRequest, Credentials, ProductCreateRequest};

fn fields_of(result: Result<(), ApiError>) -> FieldErrors {
    match result {
        Err(ApiError::Validation { errors }) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =============================================================================
// login
// =============================================================================

#[test]
fn login_requires_username() {
    let creds = Credentials { username: String::new(), password: "secret".into() };
    let errors = fields_of(check(&creds));
    assert_eq!(errors.get("username").map(String::as_str), Some("username is required"));
    assert!(!errors.contains_key("password"));
}

#[test]
fn login_requires_password() {
    let creds = Credentials { username: "admin".into(), password: String::new() };
    let errors = fields_of(check(&creds));
    assert!(errors.contains_key("password"));
}

#[test]
fn login_accepts_non_empty_pair() {
    let creds = Credentials { username: "admin".into(), password: "secret".into() };
    assert!(check(&creds).is_ok());
}

// =============================================================================
// category
// =============================================================================

#[test]
fn category_empty_name_fails_keyed_on_name() {
    let request = CategoryCreateRequest { name: String::new(), ..CategoryCreateRequest::default() };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("name"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn category_name_over_200_chars_fails() {
    let request = CategoryCreateRequest { name: "A".repeat(201), ..CategoryCreateRequest::default() };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("name"));
}

#[test]
fn category_name_alone_passes() {
    let request = CategoryCreateRequest { name: "Snacks".into(), ..CategoryCreateRequest::default() };
    assert!(check(&request).is_ok());
}

#[test]
fn category_slug_over_100_chars_fails() {
    let request = CategoryCreateRequest {
        name: "Snacks".into(),
        slug: Some("s".repeat(101)),
        ..CategoryCreateRequest::default()
    };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("slug"));
}

#[test]
fn category_description_over_1000_chars_fails() {
    let request = CategoryCreateRequest {
        name: "Snacks".into(),
        description: Some("d".repeat(1001)),
        ..CategoryCreateRequest::default()
    };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("description"));
}

#[test]
fn category_boundary_lengths_pass() {
    let request = CategoryCreateRequest {
        name: "N".repeat(200),
        slug: Some("s".repeat(100)),
        description: Some("d".repeat(1000)),
        picture: None,
    };
    assert!(check(&request).is_ok());
}

// =============================================================================
// product
// =============================================================================

fn valid_product() -> ProductCreateRequest {
    ProductCreateRequest {
        name: "Chips".into(),
        price: Decimal::new(105, 1), // 10.5
        stock: 0,
        ..ProductCreateRequest::default()
    }
}

#[test]
fn product_zero_price_fails() {
    let request = ProductCreateRequest { price: Decimal::ZERO, ..valid_product() };
    let errors = fields_of(check(&request));
    assert_eq!(errors.get("price").map(String::as_str), Some("price must be greater than 0"));
}

#[test]
fn product_negative_price_fails() {
    let request = ProductCreateRequest { price: Decimal::new(-1, 0), ..valid_product() };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("price"));
}

#[test]
fn product_negative_stock_fails_keyed_on_stock() {
    let request = ProductCreateRequest { stock: -1, ..valid_product() };
    let errors = fields_of(check(&request));
    assert_eq!(errors.get("stock").map(String::as_str), Some("stock cannot be negative"));
    assert!(!errors.contains_key("price"));
}

#[test]
fn product_minimal_valid_passes() {
    // {price: 10.5, stock: 0, name: "Chips"} is the smallest accepted input.
    assert!(check(&valid_product()).is_ok());
}

#[test]
fn product_empty_name_fails() {
    let request = ProductCreateRequest { name: String::new(), ..valid_product() };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("name"));
}

#[test]
fn product_zero_category_id_fails() {
    let request = ProductCreateRequest { category_id: Some(0), ..valid_product() };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("category_id"));
}

#[test]
fn product_multiple_failures_reported_per_field() {
    let request = ProductCreateRequest {
        name: String::new(),
        price: Decimal::ZERO,
        stock: -5,
        ..ProductCreateRequest::default()
    };
    let errors = fields_of(check(&request));
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("price"));
    assert!(errors.contains_key("stock"));
}

// =============================================================================
// price_is_positive
// =============================================================================

#[test]
fn price_rule_accepts_smallest_positive() {
    assert!(price_is_positive(&Decimal::new(1, 2)).is_ok()); // 0.01
}

#[test]
fn price_rule_rejects_zero_and_negative() {
    assert!(price_is_positive(&Decimal::ZERO).is_err());
    assert!(price_is_positive(&Decimal::new(-100, 2)).is_err());
}
