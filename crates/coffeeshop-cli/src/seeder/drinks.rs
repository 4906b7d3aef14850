//! Drink seeding functionality.
//!
//! Provides functions for generating and inserting fake drink data
//! into the database.

use coffeeshop_models::Ingredient;
use fake::Fake;
use fake::faker::lorem::en::Word;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{DrinkSeed, SeedConfig};

const STYLES: [&str; 8] = [
    "Latte",
    "Mocha",
    "Cold Brew",
    "Espresso",
    "Macchiato",
    "Cortado",
    "Flat White",
    "Frappe",
];

const COLORS: [&str; 8] = [
    "amber", "cream", "caramel", "green", "pink", "red", "black", "gold",
];

const BASES: [(&str, &str); 4] = [
    ("espresso", "brown"),
    ("milk", "white"),
    ("water", "blue"),
    ("foam", "grey"),
];

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generates drinks with unique titles
pub fn generate_drinks(config: &SeedConfig) -> Vec<DrinkSeed> {
    (0..config.count)
        .map(|i| {
            let word: String = Word().fake();
            let style = STYLES[i % STYLES.len()];
            let (base, base_color) = BASES[i % BASES.len()];

            let mut recipe = vec![Ingredient {
                name: base.to_string(),
                color: base_color.to_string(),
                parts: (1..4).fake::<i32>(),
            }];

            let extras = (0..config.max_ingredients).fake::<usize>();
            for _ in 0..extras {
                let name: String = Word().fake();
                let color = COLORS[(0..COLORS.len()).fake::<usize>()];
                recipe.push(Ingredient {
                    name,
                    color: color.to_string(),
                    parts: (1..3).fake::<i32>(),
                });
            }

            DrinkSeed {
                title: format!("{} {} {}", capitalize(&word), style, i + 1),
                recipe,
            }
        })
        .collect()
}

/// Seeds drinks into the database. Titles that already exist are skipped.
pub async fn seed_drinks(
    db: &PgPool,
    config: &SeedConfig,
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("☕ Seeding {} drinks...", config.count);

    let drinks = generate_drinks(config);
    let ids = insert_drinks_batch(db, &drinks).await?;

    println!(
        "   ✓ Inserted {} drinks in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts drinks in batches
pub async fn insert_drinks_batch(
    db: &PgPool,
    drinks: &[DrinkSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(drinks.len());

    for chunk in drinks.chunks(BATCH_SIZE) {
        let ids = insert_drinks_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_drinks_chunk(
    tx: &mut Transaction<'_, Postgres>,
    drinks: &[DrinkSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    if drinks.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO drinks (title, recipe) VALUES ");

    for i in 0..drinks.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }

    query.push_str(" ON CONFLICT (title) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for drink in drinks {
        q = q.bind(&drink.title).bind(Json(&drink.recipe));
    }

    let ids: Vec<i32> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Clears all drinks from the database
pub async fn clear_drinks(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing drinks...");

    let result = sqlx::query("DELETE FROM drinks")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} drinks in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_titles_are_unique() {
        let drinks = generate_drinks(&SeedConfig::new(50));
        let titles: HashSet<_> = drinks.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles.len(), 50);
    }

    #[test]
    fn test_generated_recipes_are_valid() {
        let config = SeedConfig::new(25).with_max_ingredients(3);
        for drink in generate_drinks(&config) {
            assert!(!drink.title.is_empty() && drink.title.len() <= 80);
            assert!(!drink.recipe.is_empty() && drink.recipe.len() <= 3);
            for ingredient in &drink.recipe {
                assert!(!ingredient.name.is_empty());
                assert!(!ingredient.color.is_empty());
                assert!(ingredient.parts >= 1);
            }
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("vanilla"), "Vanilla");
        assert_eq!(capitalize(""), "");
    }
}
