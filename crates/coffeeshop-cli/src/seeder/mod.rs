//! Fake drink data for local development.

mod drinks;
mod models;

pub use drinks::{clear_drinks, generate_drinks, insert_drinks_batch, seed_drinks};
pub use models::{DrinkSeed, SeedConfig};
