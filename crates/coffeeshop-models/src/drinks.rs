//! Drink domain models and DTOs.
//!
//! A drink's recipe is an ordered, non-empty list of ingredients stored as a
//! JSON document. Clients may send a single ingredient object where a list is
//! expected; it is normalised to a one-element list on the way in.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Ingredient {
    #[validate(length(min = 1, max = 80), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 40), custom(function = "not_blank"))]
    pub color: String,
    /// Relative amount of this ingredient
    #[validate(range(min = 1))]
    pub parts: i32,
}

/// Ingredient as shown in the public menu, without amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortIngredient {
    pub name: String,
    pub color: String,
}

/// A recipe as accepted from clients: one ingredient or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl From<RecipeInput> for Vec<Ingredient> {
    fn from(input: RecipeInput) -> Self {
        match input {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

fn recipe<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: Deserializer<'de>,
{
    RecipeInput::deserialize(deserializer).map(Into::into)
}

fn optional_recipe<'de, D>(deserializer: D) -> Result<Option<Vec<Ingredient>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RecipeInput>::deserialize(deserializer)?.map(Into::into))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    #[schema(value_type = Vec<Ingredient>)]
    pub recipe: Json<Vec<Ingredient>>,
}

impl Drink {
    pub fn new(id: i32, title: impl Into<String>, recipe: Vec<Ingredient>) -> Self {
        Self {
            id,
            title: title.into(),
            recipe: Json(recipe),
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.recipe.0
    }

    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .ingredients()
                .iter()
                .map(|i| ShortIngredient {
                    name: i.name.clone(),
                    color: i.color.clone(),
                })
                .collect(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.ingredients().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDrinkDto {
    #[validate(length(min = 1, max = 80), custom(function = "not_blank"))]
    pub title: String,
    /// A single ingredient or a list of ingredients
    #[serde(deserialize_with = "recipe")]
    #[schema(value_type = RecipeInput)]
    #[validate(length(min = 1), nested)]
    pub recipe: Vec<Ingredient>,
}

/// Partial update: omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update"))]
pub struct UpdateDrinkDto {
    #[validate(length(min = 1, max = 80), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_recipe")]
    #[schema(value_type = Option<RecipeInput>)]
    #[validate(length(min = 1), nested)]
    pub recipe: Option<Vec<Ingredient>>,
}

impl UpdateDrinkDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}

fn validate_update(dto: &UpdateDrinkDto) -> Result<(), ValidationError> {
    if dto.is_empty() {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("at least one of title or recipe is required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortDrinksResponse {
    pub success: bool,
    pub drinks: Vec<DrinkShort>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LongDrinksResponse {
    pub success: bool,
    pub drinks: Vec<DrinkLong>,
}

impl LongDrinksResponse {
    pub fn single(drink: &Drink) -> Self {
        Self {
            success: true,
            drinks: vec![drink.long()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    /// Id of the deleted drink
    pub drinks: i32,
}
