// ABOUTME: Renders an aggregated shopping list as a downloadable text document
// ABOUTME: The timestamp is injected by the caller so output is deterministic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use chrono::{DateTime, Utc};

use crate::constants::shopping_list::TIMESTAMP_FORMAT;
use crate::models::ShoppingList;

/// Upper-case the first character, leaving the rest untouched
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Render the shopping list document
#[must_use]
pub fn render(list: &ShoppingList, generated_at: DateTime<Utc>) -> String {
    let mut out = format!(
        "Shopping list for {}\n\nProducts:\n",
        generated_at.format(TIMESTAMP_FORMAT)
    );

    for (index, item) in list.items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}) - {}\n",
            index + 1,
            capitalize(&item.name),
            item.measurement_unit,
            item.total_amount
        ));
    }

    out.push_str("\nRecipes using these products:\n");

    for recipe in &list.recipes {
        out.push_str(&format!("- {} (@{})\n", recipe.name, recipe.author_username));
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::{ShoppingListItem, ShoppingListRecipe};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("flour"), "Flour");
        assert_eq!(capitalize("éclair cream"), "Éclair cream");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_empty_list_has_sections_but_no_products() {
        let document = render(&ShoppingList::default(), fixed_time());

        assert!(document.starts_with("Shopping list for 09-03-2025 14:05:07\n"));
        assert!(document.contains("Products:\n\nRecipes using these products:\n"));
    }

    #[test]
    fn test_render_full_document() {
        let list = ShoppingList {
            items: vec![
                ShoppingListItem {
                    name: "flour".into(),
                    measurement_unit: "g".into(),
                    total_amount: 300,
                },
                ShoppingListItem {
                    name: "milk".into(),
                    measurement_unit: "ml".into(),
                    total_amount: 250,
                },
            ],
            recipes: vec![ShoppingListRecipe {
                name: "Pancakes".into(),
                author_username: "alice".into(),
            }],
        };

        let expected = "Shopping list for 09-03-2025 14:05:07\n\
                        \n\
                        Products:\n\
                        1. Flour (g) - 300\n\
                        2. Milk (ml) - 250\n\
                        \n\
                        Recipes using these products:\n\
                        - Pancakes (@alice)\n";

        let document = render(&list, fixed_time());
        assert_eq!(document, expected);
    }
}
