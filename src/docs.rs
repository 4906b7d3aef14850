use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coffeeshop_core::ErrorResponse;

use crate::modules::drinks::model::{
    CreateDrinkDto, DeleteDrinkResponse, Drink, DrinkLong, DrinkShort, Ingredient,
    LongDrinksResponse, RecipeInput, ShortDrinksResponse, ShortIngredient, UpdateDrinkDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::drinks::controller::get_drinks,
        crate::modules::drinks::controller::get_drinks_detail,
        crate::modules::drinks::controller::create_drink,
        crate::modules::drinks::controller::update_drink,
        crate::modules::drinks::controller::delete_drink,
    ),
    components(
        schemas(
            Drink,
            DrinkShort,
            DrinkLong,
            Ingredient,
            ShortIngredient,
            RecipeInput,
            CreateDrinkDto,
            UpdateDrinkDto,
            ShortDrinksResponse,
            LongDrinksResponse,
            DeleteDrinkResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Drinks", description = "Drinks menu endpoints")
    ),
    info(
        title = "Coffee Shop API",
        version = "0.1.0",
        description = "Drinks menu for a coffee shop. Reading full recipes and changing the menu require permissions granted by the identity provider.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
