// ABOUTME: HTTP tests for the ingredient catalogue
// ABOUTME: Listing is unpaginated and supports a case-insensitive name filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_ingredient, create_test_app};
use foodgram_server::models::NewIngredient;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_list_and_filter_by_name() {
    let test_app = create_test_app().await;
    create_ingredient(&test_app.resources, "Brown sugar", "g").await;
    create_ingredient(&test_app.resources, "sugar", "g").await;
    create_ingredient(&test_app.resources, "salt", "g").await;

    let all: Value = AxumTestRequest::get("/api/ingredients")
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let filtered: Value = AxumTestRequest::get("/api/ingredients?name=SUG")
        .send(test_app.app())
        .await
        .json();
    let names: Vec<&str> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Brown sugar", "sugar"]);
}

#[tokio::test]
async fn test_get_single_ingredient() {
    let test_app = create_test_app().await;
    let id = create_ingredient(&test_app.resources, "butter", "g").await;

    let body: Value = AxumTestRequest::get(&format!("/api/ingredients/{id}"))
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "butter");
    assert_eq!(body["measurement_unit"], "g");

    let response = AxumTestRequest::get("/api/ingredients/12345")
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_bulk_insert_skips_existing_pairs() {
    let test_app = create_test_app().await;
    let ingredients = test_app.resources.database.ingredients();
    let batch = vec![
        NewIngredient {
            name: "rice".to_owned(),
            measurement_unit: "g".to_owned(),
        },
        NewIngredient {
            name: "rice".to_owned(),
            measurement_unit: "cup".to_owned(),
        },
    ];

    assert_eq!(ingredients.insert_many(&batch).await.unwrap(), 2);
    assert_eq!(ingredients.insert_many(&batch).await.unwrap(), 0);
    assert_eq!(ingredients.list(Some("rice")).await.unwrap().len(), 2);
}
