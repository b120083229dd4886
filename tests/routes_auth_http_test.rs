// ABOUTME: HTTP tests for token login and logout
// ABOUTME: Covers bad credentials, token use, and revocation on logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_app, create_test_user, TEST_PASSWORD};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_returns_token_usable_on_me() {
    let test_app = create_test_app().await;
    let user = create_test_user(&test_app.resources, "alice").await;

    let response = AxumTestRequest::post("/api/auth/token/login")
        .json(&json!({"email": user.email, "password": TEST_PASSWORD}))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK);
    let body: Value = response.json();
    let token = body["auth_token"].as_str().unwrap().to_owned();
    assert_eq!(token.len(), 40);

    let me: Value = AxumTestRequest::get("/api/users/me")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["username"], "alice");
    assert_eq!(me["is_subscribed"], false);
    assert!(me.get("password").is_none());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let test_app = create_test_app().await;
    let user = create_test_user(&test_app.resources, "alice").await;

    let response = AxumTestRequest::post("/api/auth/token/login")
        .json(&json!({"email": user.email, "password": "not-the-password"}))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/auth/token/login")
        .json(&json!({"email": "nobody@example.com", "password": TEST_PASSWORD}))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let test_app = create_test_app().await;
    let user = create_test_user(&test_app.resources, "alice").await;
    let token = common::login(&test_app.resources, &user).await;

    AxumTestRequest::post("/api/auth/token/logout")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = AxumTestRequest::get("/api/users/me")
        .token(&token)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_bearer_scheme_is_accepted() {
    let test_app = create_test_app().await;
    let user = create_test_user(&test_app.resources, "alice").await;
    let token = common::login(&test_app.resources, &user).await;

    let response = AxumTestRequest::get("/api/users/me")
        .header("authorization", &format!("Bearer {token}"))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let test_app = create_test_app().await;

    let response = AxumTestRequest::get("/api/users/me")
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert!(body["error"]["message"].is_string());
}
