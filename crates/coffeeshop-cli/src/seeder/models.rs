//! Data models for database seeding configuration.

use coffeeshop_models::Ingredient;

/// Seed data for creating a drink.
#[derive(Debug, Clone)]
pub struct DrinkSeed {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// How many drinks to generate and how elaborate their recipes are.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub count: usize,
    pub max_ingredients: usize,
}

impl SeedConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_ingredients: 4,
        }
    }

    pub fn with_max_ingredients(mut self, max_ingredients: usize) -> Self {
        self.max_ingredients = max_ingredients.max(1);
        self
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self::new(10)
    }
}
