use anyhow::anyhow;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use coffeeshop_core::AppError;

pub use coffeeshop_models::{
    CreateDrinkDto, DeleteDrinkResponse, Drink, DrinkLong, DrinkShort, Ingredient,
    LongDrinksResponse, RecipeInput, ShortDrinksResponse, ShortIngredient, UpdateDrinkDto,
};

/// Drink id taken from the `{id}` path segment.
///
/// A segment that is not an integer cannot name a drink, so it is reported
/// as a missing drink rather than a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkId(pub i32);

impl<S> FromRequestParts<S> for DrinkId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| drink_not_found())?;

        raw.parse::<i32>()
            .map(DrinkId)
            .map_err(|_| drink_not_found())
    }
}

pub fn drink_not_found() -> AppError {
    AppError::not_found(anyhow!("Drink not found"))
}
