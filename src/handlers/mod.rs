pub mod products;

use axum::{http::StatusCode, response::Html, Json};
use serde_json::json;

use crate::error::AppError;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "message": "OK" })))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("The requested resource was not found".to_string())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("The HTTP method is not allowed for this resource".to_string())
}
