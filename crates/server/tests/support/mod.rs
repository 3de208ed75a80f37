#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::Service;

use server::{routes, state::ServerState};
use service::{credentials::CredentialHasher, storage::MemoryStore, token::TokenIssuer};

pub const SECRET: &str = "integration-secret";

pub fn build_app() -> Router {
    let store = Arc::new(MemoryStore::default());
    let state = ServerState::new(store.clone(), store, CredentialHasher::fast(), TokenIssuer::new(SECRET, 600));
    routes::build_router(state, tower_http::cors::CorsLayer::very_permissive())
}

pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {}", t));
    }
    let req = match body {
        Some(json) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

/// Send a raw body with a JSON content type.
pub async fn send_raw(app: &Router, method: &str, uri: &str, token: Option<&str>, body: &str) -> anyhow::Result<(StatusCode, Option<String>, Value)> {
    let mut builder = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {}", t));
    }
    let resp = app.clone().call(builder.body(Body::from(body.to_string()))?).await?;
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, content_type, value))
}

/// Register a user and sign in; returns `(user_id, token)`.
pub async fn register_and_sign_in(app: &Router, email: &str, password: &str) -> anyhow::Result<(String, String)> {
    let (status, user) = send(app, "POST", "/users", None, Some(serde_json::json!({"email": email, "password": password}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, auth) = send(app, "POST", "/auth/credentials", None, Some(serde_json::json!({"email": email, "password": password}))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok((
        user["id"].as_str().unwrap_or_default().to_string(),
        auth["token"].as_str().unwrap_or_default().to_string(),
    ))
}
