//! Product API model tests
//!
//! The client's network path is exercised by the live e2e tests; the decode
//! and validation rules are verified here against canned payloads.

use std::time::Duration;

use pretty_assertions::assert_eq;
use shopcheck::api::{ApiClient, Product};

#[test]
fn product_decodes_permissively() {
    // A realistic backend payload with fields the harness does not model
    let json = r#"{
        "id": 4,
        "title": "Sample Casual Slim Fit",
        "price": 15.99,
        "description": "long text",
        "category": "men's clothing",
        "image": "https://cdn.example.com/4.jpg",
        "rating": { "rate": 2.1, "count": 430 }
    }"#;

    let product: Product = serde_json::from_str(json).unwrap();
    assert_eq!(product.id, 4);
    assert_eq!(product.title, "Sample Casual Slim Fit");
    assert_eq!(product.price, 15.99);
}

#[test]
fn product_decode_requires_core_fields() {
    let json = r#"{ "id": 4, "title": "No price here" }"#;
    assert!(serde_json::from_str::<Product>(json).is_err());
}

#[test]
fn validation_rejects_blank_title() {
    let product = Product {
        id: 9,
        title: "   ".to_string(),
        price: 3.5,
    };
    let message = product.validate().unwrap_err().to_string();
    assert!(message.contains("empty title"));
    assert!(message.contains('9'));
}

#[test]
fn validation_rejects_negative_price() {
    let product = Product {
        id: 9,
        title: "Sample".to_string(),
        price: -1.0,
    };
    assert!(product
        .validate()
        .unwrap_err()
        .to_string()
        .contains("negative price"));
}

#[test]
fn validation_accepts_zero_price() {
    let product = Product {
        id: 9,
        title: "Sample".to_string(),
        price: 0.0,
    };
    assert!(product.validate().is_ok());
}

#[test]
fn client_rejects_invalid_base_url() {
    let err = ApiClient::new("definitely not a url", Duration::from_secs(15)).unwrap_err();
    assert!(err.to_string().contains("api.base.url"));
}

#[test]
fn client_accepts_base_url_without_trailing_slash() {
    assert!(ApiClient::new("https://api.example.com", Duration::from_secs(15)).is_ok());
    assert!(ApiClient::new("https://api.example.com/", Duration::from_secs(15)).is_ok());
}
