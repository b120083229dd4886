// ABOUTME: HTTP tests for the shopping-list download
// ABOUTME: Verifies aggregation across recipes and the text document layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{
    create_ingredient, create_recipe, create_test_app, create_user_with_token, product_lines,
};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_empty_cart_downloads_document_without_products() {
    let test_app = create_test_app().await;
    let (_user, token) = create_user_with_token(&test_app.resources, "shopper").await;

    let response = AxumTestRequest::get("/api/recipes/download_shopping_cart")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        response.header("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.header("content-disposition").unwrap(),
        "attachment; filename=\"shopping_cart.txt\""
    );

    let document = response.text();
    assert!(document.starts_with("Shopping list for "));
    assert!(product_lines(&document).is_empty());
}

#[tokio::test]
async fn test_shared_ingredients_are_summed() {
    let test_app = create_test_app().await;
    let (chef, _) = create_user_with_token(&test_app.resources, "chef").await;
    let (_shopper, token) = create_user_with_token(&test_app.resources, "shopper").await;
    let flour = create_ingredient(&test_app.resources, "flour", "g").await;
    let eggs = create_ingredient(&test_app.resources, "eggs", "pcs").await;
    let milk = create_ingredient(&test_app.resources, "milk", "ml").await;

    let pancakes = create_recipe(
        &test_app.resources,
        chef.id,
        "Pancakes",
        20,
        &[(flour, 200), (eggs, 2), (milk, 300)],
    )
    .await;
    let bread = create_recipe(&test_app.resources, chef.id, "Bread", 90, &[(flour, 500)]).await;
    // Not in the cart, must not be counted
    create_recipe(&test_app.resources, chef.id, "Custard", 30, &[(milk, 1000)]).await;

    for recipe_id in [pancakes, bread] {
        AxumTestRequest::post(&format!("/api/recipes/{recipe_id}/shopping_cart"))
            .token(&token)
            .send(test_app.app())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let document = AxumTestRequest::get("/api/recipes/download_shopping_cart")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .text();

    assert_eq!(
        product_lines(&document),
        vec!["1. Eggs (pcs) - 2", "2. Flour (g) - 700", "3. Milk (ml) - 300"]
    );
    assert!(document.contains("- Pancakes (@chef)"));
    assert!(document.contains("- Bread (@chef)"));
    assert!(!document.contains("Custard"));
}

#[tokio::test]
async fn test_same_name_with_different_units_stays_separate() {
    let test_app = create_test_app().await;
    let (chef, token) = create_user_with_token(&test_app.resources, "chef").await;
    let sugar_tbsp = create_ingredient(&test_app.resources, "sugar", "tbsp").await;
    let sugar_g = create_ingredient(&test_app.resources, "sugar", "g").await;
    let butter = create_ingredient(&test_app.resources, "butter", "g").await;

    let cake = create_recipe(
        &test_app.resources,
        chef.id,
        "Cake",
        45,
        &[(sugar_g, 150), (butter, 100)],
    )
    .await;
    let tea = create_recipe(&test_app.resources, chef.id, "Tea", 5, &[(sugar_tbsp, 2)]).await;
    let fudge = create_recipe(
        &test_app.resources,
        chef.id,
        "Fudge",
        60,
        &[(sugar_g, 50), (sugar_tbsp, 1)],
    )
    .await;

    for recipe_id in [cake, tea, fudge] {
        AxumTestRequest::post(&format!("/api/recipes/{recipe_id}/shopping_cart"))
            .token(&token)
            .send(test_app.app())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let document = AxumTestRequest::get("/api/recipes/download_shopping_cart")
        .token(&token)
        .send(test_app.app())
        .await
        .assert_status(StatusCode::OK)
        .text();

    assert_eq!(
        product_lines(&document),
        vec![
            "1. Butter (g) - 100",
            "2. Sugar (g) - 200",
            "3. Sugar (tbsp) - 3"
        ]
    );
}

#[tokio::test]
async fn test_download_requires_auth() {
    let test_app = create_test_app().await;

    let response = AxumTestRequest::get("/api/recipes/download_shopping_cart")
        .send(test_app.app())
        .await;
    assert_eq!(response.status(), 401);
}
