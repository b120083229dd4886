// ABOUTME: Tests for recipe short links: creation, reuse, redirect, and cleanup
// ABOUTME: Covers both the API endpoint and the redirect route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_ingredient, create_recipe, create_test_app, create_user_with_token};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_get_link_is_stable_and_redirects() {
    let test_app = create_test_app().await;
    let (chef, _) = create_user_with_token(&test_app.resources, "chef").await;
    let salt = create_ingredient(&test_app.resources, "salt", "g").await;
    let recipe_id = create_recipe(&test_app.resources, chef.id, "Soup", 30, &[(salt, 2)]).await;

    let first: Value = AxumTestRequest::get(&format!("/api/recipes/{recipe_id}/get-link"))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let second: Value = AxumTestRequest::get(&format!("/api/recipes/{recipe_id}/get-link"))
        .send(test_app.app())
        .await
        .json();

    let link = first["short-link"].as_str().unwrap();
    assert_eq!(first, second);

    let base = &test_app.resources.config.urls.public_base_url;
    let path = link.strip_prefix(base.as_str()).unwrap();
    assert!(path.starts_with("/s/"));
    assert_eq!(path.len(), "/s/".len() + 6);

    let response = AxumTestRequest::get(path).send(test_app.app()).await;
    assert_eq!(response.status(), 302);
    assert_eq!(
        response.header("location").unwrap(),
        format!(
            "{}/recipes/{recipe_id}",
            test_app.resources.config.urls.frontend_url
        )
    );
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let test_app = create_test_app().await;

    let response = AxumTestRequest::get("/s/zzzzzz").send(test_app.app()).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_link_for_missing_recipe_is_not_found() {
    let test_app = create_test_app().await;

    let response = AxumTestRequest::get("/api/recipes/77/get-link")
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_deleting_recipe_removes_its_link() {
    let test_app = create_test_app().await;
    let (chef, _) = create_user_with_token(&test_app.resources, "chef").await;
    let salt = create_ingredient(&test_app.resources, "salt", "g").await;
    let recipe_id = create_recipe(&test_app.resources, chef.id, "Soup", 30, &[(salt, 2)]).await;

    let links = test_app.resources.database.short_links();
    let code = links.get_or_create(recipe_id).await.unwrap();
    assert_eq!(links.resolve(&code).await.unwrap(), Some(recipe_id));

    assert!(test_app
        .resources
        .database
        .recipes()
        .delete(recipe_id)
        .await
        .unwrap());
    assert_eq!(links.resolve(&code).await.unwrap(), None);
}
