#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use product_catalog::{build_router, db::InMemoryProductRepository, AppState};
use rand::{seq::SliceRandom, Rng};
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const CATEGORIES: &[&str] = &[
    "UNKNOWN",
    "CLOTHS",
    "FOOD",
    "HOUSEWARES",
    "AUTOMOTIVE",
    "TOOLS",
];

/// Random but valid product bodies.
pub struct ProductFactory;

impl ProductFactory {
    pub fn build() -> Value {
        let mut rng = rand::thread_rng();
        let cents: u32 = rng.gen_range(50..=200_000);
        json!({
            "name": NAMES.choose(&mut rng).copied().unwrap_or("Hat"),
            "description": format!("Factory product #{}", rng.gen_range(1..=9_999)),
            "price": format!("{}.{:02}", cents / 100, cents % 100),
            "available": rng.gen_bool(0.5),
            "category": CATEGORIES.choose(&mut rng).copied().unwrap_or("UNKNOWN"),
        })
    }
}

pub fn app() -> Router {
    build_router(AppState::new(InMemoryProductRepository::new()))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// POSTs `count` factory products and returns the created representations.
pub async fn create_products(app: &Router, count: usize) -> Vec<Value> {
    let mut created = Vec::with_capacity(count);
    for _ in 0..count {
        let response = send(app, "POST", "/products", Some(&ProductFactory::build())).await;
        assert_eq!(response.status(), 201, "Could not create test product");
        created.push(json_body(response).await);
    }
    created
}
