//! # Coffee Shop Core
//!
//! Foundational types shared by every crate in the Coffee Shop API:
//!
//! - [`errors`]: Application error type and the JSON error envelope
//! - [`permissions`]: Permission scope constants granted by the identity provider
//!
//! # Example
//!
//! ```ignore
//! use coffeeshop_core::errors::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Drink not found"));
//! ```

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, error_response};
