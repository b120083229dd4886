// ABOUTME: HTTP tests for registration, profiles, passwords, avatars, and subscriptions
// ABOUTME: Drives the fully layered application against an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{
    create_ingredient, create_recipe, create_test_app, create_user_with_token, PNG_DATA_URL,
    TEST_PASSWORD,
};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn registration(username: &str) -> Value {
    json!({
        "email": format!("{username}@example.com"),
        "username": username,
        "first_name": "Ann",
        "last_name": "Smith",
        "password": "s3cret-pass",
    })
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_public_fields() {
    let test_app = create_test_app().await;

    let body: Value = AxumTestRequest::post("/api/users")
        .json(&registration("ann"))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["username"], "ann");
    assert_eq!(body["email"], "ann@example.com");
    assert!(body["id"].as_i64().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("is_subscribed").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let test_app = create_test_app().await;

    AxumTestRequest::post("/api/users")
        .json(&registration("ann"))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::CREATED);

    let mut duplicate = registration("ann2");
    duplicate["email"] = json!("ann@example.com");
    let response = AxumTestRequest::post("/api/users")
        .json(&duplicate)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_register_rejects_reserved_username_and_weak_password() {
    let test_app = create_test_app().await;

    let response = AxumTestRequest::post("/api/users")
        .json(&registration("me"))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);

    let mut weak = registration("bob");
    weak["password"] = json!("12345678");
    let response = AxumTestRequest::post("/api/users")
        .json(&weak)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_user_list_is_paginated() {
    let test_app = create_test_app().await;
    for name in ["u1", "u2", "u3"] {
        common::create_test_user(&test_app.resources, name).await;
    }

    let body: Value = AxumTestRequest::get("/api/users?limit=2")
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert!(body["next"].as_str().unwrap().contains("page=2"));
    assert!(body["previous"].is_null());
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let test_app = create_test_app().await;

    let response = AxumTestRequest::get("/api/users/999")
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Password
// ============================================================================

#[tokio::test]
async fn test_set_password_requires_current_password() {
    let test_app = create_test_app().await;
    let (user, token) = create_user_with_token(&test_app.resources, "ann").await;

    let response = AxumTestRequest::post("/api/users/set_password")
        .token(&token)
        .json(&json!({"current_password": "wrong-one", "new_password": "brand-new-pass"}))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);

    AxumTestRequest::post("/api/users/set_password")
        .token(&token)
        .json(&json!({"current_password": TEST_PASSWORD, "new_password": "brand-new-pass"}))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = AxumTestRequest::post("/api/auth/token/login")
        .json(&json!({"email": user.email, "password": "brand-new-pass"}))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 200);
}

// ============================================================================
// Avatar
// ============================================================================

#[tokio::test]
async fn test_avatar_upload_and_removal() {
    let test_app = create_test_app().await;
    let (_user, token) = create_user_with_token(&test_app.resources, "ann").await;

    let body: Value = AxumTestRequest::put("/api/users/me/avatar")
        .token(&token)
        .json(&json!({"avatar": PNG_DATA_URL}))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let url = body["avatar"].as_str().unwrap();
    assert!(url.contains("/media/avatars/"));
    assert!(url.ends_with(".png"));

    let me: Value = AxumTestRequest::get("/api/users/me")
        .token(&token)
        .send(test_app.app())
        .await
        .json();
    assert_eq!(me["avatar"], url);

    AxumTestRequest::delete("/api/users/me/avatar")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let me: Value = AxumTestRequest::get("/api/users/me")
        .token(&token)
        .send(test_app.app())
        .await
        .json();
    assert!(me["avatar"].is_null());
}

#[tokio::test]
async fn test_avatar_requires_image() {
    let test_app = create_test_app().await;
    let (_user, token) = create_user_with_token(&test_app.resources, "ann").await;

    let response = AxumTestRequest::put("/api/users/me/avatar")
        .token(&token)
        .json(&json!({}))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::put("/api/users/me/avatar")
        .token(&token)
        .json(&json!({"avatar": "data:text/plain;base64,aGVsbG8="}))
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);
}

// ============================================================================
// Subscriptions
// ============================================================================

#[tokio::test]
async fn test_subscribe_and_list_with_recipes_limit() {
    let test_app = create_test_app().await;
    let (_reader, token) = create_user_with_token(&test_app.resources, "reader").await;
    let (author, _) = create_user_with_token(&test_app.resources, "chef").await;
    let salt = create_ingredient(&test_app.resources, "salt", "g").await;
    for name in ["Soup", "Salad", "Stew"] {
        create_recipe(&test_app.resources, author.id, name, 10, &[(salt, 5)]).await;
    }

    let body: Value = AxumTestRequest::post(&format!(
        "/api/users/{}/subscribe?recipes_limit=2",
        author.id
    ))
    .token(&token)
    .send(test_app.app())
    .await
    .assert_status(StatusCode::CREATED)
    .json();
    assert_eq!(body["username"], "chef");
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 3);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);

    let page: Value = AxumTestRequest::get("/api/users/subscriptions?recipes_limit=1")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["count"], 1);
    assert_eq!(page["results"][0]["recipes"].as_array().unwrap().len(), 1);

    let profile: Value = AxumTestRequest::get(&format!("/api/users/{}", author.id))
        .token(&token)
        .send(test_app.app())
        .await
        .json();
    assert_eq!(profile["is_subscribed"], true);
}

#[tokio::test]
async fn test_subscribe_to_self_or_twice_is_rejected() {
    let test_app = create_test_app().await;
    let (reader, token) = create_user_with_token(&test_app.resources, "reader").await;
    let (author, _) = create_user_with_token(&test_app.resources, "chef").await;

    let response = AxumTestRequest::post(&format!("/api/users/{}/subscribe", reader.id))
        .token(&token)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);

    let uri = format!("/api/users/{}/subscribe", author.id);
    AxumTestRequest::post(&uri)
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::CREATED);
    let response = AxumTestRequest::post(&uri)
        .token(&token)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_unsubscribe_requires_existing_subscription() {
    let test_app = create_test_app().await;
    let (_reader, token) = create_user_with_token(&test_app.resources, "reader").await;
    let (author, _) = create_user_with_token(&test_app.resources, "chef").await;
    let uri = format!("/api/users/{}/subscribe", author.id);

    let response = AxumTestRequest::delete(&uri)
        .token(&token)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 404);

    AxumTestRequest::post(&uri)
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::CREATED);
    AxumTestRequest::delete(&uri)
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_subscribe_to_missing_author_is_not_found() {
    let test_app = create_test_app().await;
    let (_reader, token) = create_user_with_token(&test_app.resources, "reader").await;

    let response = AxumTestRequest::post("/api/users/999/subscribe")
        .token(&token)
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 404);
}
