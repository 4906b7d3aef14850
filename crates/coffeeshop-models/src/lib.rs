//! # Coffee Shop Models
//!
//! Domain models and DTOs for the Coffee Shop API.
//!
//! # Modules
//!
//! - [`drinks`]: The drink entity, its recipe ingredients, the short and long
//!   views and the create/update DTOs
//!
//! # Example
//!
//! ```ignore
//! use coffeeshop_models::drinks::{CreateDrinkDto, Drink};
//!
//! let drink: Drink = repo.create(dto.title, dto.recipe).await?;
//! let view = drink.long();
//! ```

pub mod drinks;

// Re-export commonly used types at crate root for convenience
pub use drinks::{
    CreateDrinkDto, DeleteDrinkResponse, Drink, DrinkLong, DrinkShort, Ingredient,
    LongDrinksResponse, RecipeInput, ShortDrinksResponse, ShortIngredient, UpdateDrinkDto,
};
