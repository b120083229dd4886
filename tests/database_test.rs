// ABOUTME: Database manager tests against an in-memory SQLite pool
// ABOUTME: Covers uniqueness rules, cascades, and collection membership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_ingredient, create_recipe, create_test_app, create_test_user};
use foodgram_server::{
    errors::ErrorCode,
    models::{NewUser, RecipeCollection},
    pagination::PageWindow,
};

#[tokio::test]
async fn test_email_lookup_ignores_case_and_duplicates_fail() {
    let test_app = create_test_app().await;
    let users = test_app.resources.database.users();
    let ann = create_test_user(&test_app.resources, "ann").await;

    let found = users.get_by_email("ANN@Example.com").await.unwrap().unwrap();
    assert_eq!(found.id, ann.id);

    let error = users
        .create(&NewUser {
            email: ann.email.clone(),
            username: "someone-else".to_owned(),
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            password_hash: ann.password_hash.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_deleting_recipe_clears_collections() {
    let test_app = create_test_app().await;
    let database = &test_app.resources.database;
    let chef = create_test_user(&test_app.resources, "chef").await;
    let salt = create_ingredient(&test_app.resources, "salt", "g").await;
    let recipe_id = create_recipe(&test_app.resources, chef.id, "Soup", 30, &[(salt, 2)]).await;

    let recipes = database.recipes();
    recipes
        .add_to_collection(RecipeCollection::Favorites, chef.id, recipe_id)
        .await
        .unwrap();
    recipes
        .add_to_collection(RecipeCollection::ShoppingCart, chef.id, recipe_id)
        .await
        .unwrap();
    assert!(recipes
        .in_collection(RecipeCollection::Favorites, chef.id, recipe_id)
        .await
        .unwrap());

    assert!(recipes.delete(recipe_id).await.unwrap());
    assert!(!recipes.delete(recipe_id).await.unwrap());
    assert!(recipes.shopping_list(chef.id).await.unwrap().is_empty());
    assert!(!recipes
        .in_collection(RecipeCollection::Favorites, chef.id, recipe_id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_subscription_listing_pages_authors() {
    let test_app = create_test_app().await;
    let subscriptions = test_app.resources.database.subscriptions();
    let reader = create_test_user(&test_app.resources, "reader").await;

    for name in ["a1", "a2", "a3"] {
        let author = create_test_user(&test_app.resources, name).await;
        subscriptions.subscribe(reader.id, author.id).await.unwrap();
        assert!(subscriptions.is_subscribed(reader.id, author.id).await.unwrap());
    }

    let (authors, count) = subscriptions
        .list_authors(reader.id, PageWindow { page: 2, limit: 2 })
        .await
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(authors.len(), 1);

    let error = subscriptions.subscribe(reader.id, reader.id).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
