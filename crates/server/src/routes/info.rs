//! Stateless informational endpoints.

use axum::{http::StatusCode, Json};
use serde::Serialize;

use common::types::{Health, Message};

#[derive(Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub message: &'static str,
}

#[utoipa::path(get, path = "/health", tag = "info", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/hello", tag = "info", responses((status = 200, description = "Greeting", body = crate::openapi::MessageDoc)))]
pub async fn hello() -> Json<Message> {
    Json(Message::new("hello world"))
}

#[utoipa::path(get, path = "/v1", tag = "info", responses((status = 200, description = "Version info", body = crate::openapi::VersionInfoDoc)))]
pub async fn v1() -> Json<VersionInfo> {
    Json(VersionInfo { version: "v1", message: "users API with schema-validated request bodies" })
}

#[utoipa::path(get, path = "/v2", tag = "info", responses((status = 200, description = "Version info", body = crate::openapi::VersionInfoDoc)))]
pub async fn v2() -> Json<VersionInfo> {
    Json(VersionInfo { version: "v2", message: "products API with full-replace validation" })
}

pub async fn not_found() -> (StatusCode, Json<Message>) {
    (StatusCode::NOT_FOUND, Json(Message::new("route not found")))
}
