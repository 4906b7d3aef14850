//! # Coffee Shop CLI
//!
//! Database seeding utilities for Coffee Shop development and demos.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use coffeeshop_cli::seeder::{seed_drinks, SeedConfig};
//!
//! let config = SeedConfig::new(20);
//! seed_drinks(&pool, &config).await?;
//! ```

pub mod seeder;
