use axum::{Json, extract::State};
use tracing::instrument;

use coffeeshop_core::{AppError, ErrorResponse};

use crate::middleware::auth::{
    RequireDrinksCreate, RequireDrinksDelete, RequireDrinksDetail, RequireDrinksUpdate,
};
use crate::modules::drinks::model::{
    CreateDrinkDto, DeleteDrinkResponse, DrinkId, LongDrinksResponse, ShortDrinksResponse,
    UpdateDrinkDto,
};
use crate::modules::drinks::service::DrinkService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/drinks",
    responses(
        (status = 200, description = "Public menu without ingredient amounts", body = ShortDrinksResponse)
    ),
    tag = "Drinks"
)]
#[instrument(skip(state))]
pub async fn get_drinks(
    State(state): State<AppState>,
) -> Result<Json<ShortDrinksResponse>, AppError> {
    let drinks = DrinkService::get_drinks(state.drinks.as_ref()).await?;
    Ok(Json(drinks))
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    responses(
        (status = 200, description = "Full recipes", body = LongDrinksResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires get:drinks-detail permission", body = ErrorResponse)
    ),
    tag = "Drinks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(subject = auth.subject().unwrap_or("unknown")))]
pub async fn get_drinks_detail(
    State(state): State<AppState>,
    RequireDrinksDetail(auth): RequireDrinksDetail,
) -> Result<Json<LongDrinksResponse>, AppError> {
    let drinks = DrinkService::get_drinks_detail(state.drinks.as_ref()).await?;
    Ok(Json(drinks))
}

#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkDto,
    responses(
        (status = 200, description = "Drink created", body = LongDrinksResponse),
        (status = 400, description = "Malformed body or missing field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires post:drinks permission", body = ErrorResponse),
        (status = 422, description = "Invalid drink or duplicate title", body = ErrorResponse)
    ),
    tag = "Drinks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(subject = auth.subject().unwrap_or("unknown")))]
pub async fn create_drink(
    State(state): State<AppState>,
    RequireDrinksCreate(auth): RequireDrinksCreate,
    ValidatedJson(dto): ValidatedJson<CreateDrinkDto>,
) -> Result<Json<LongDrinksResponse>, AppError> {
    let drink = DrinkService::create_drink(state.drinks.as_ref(), dto).await?;
    Ok(Json(drink))
}

#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    params(("id" = i32, Path, description = "Drink ID")),
    request_body = UpdateDrinkDto,
    responses(
        (status = 200, description = "Drink updated", body = LongDrinksResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires patch:drinks permission", body = ErrorResponse),
        (status = 404, description = "Drink not found", body = ErrorResponse),
        (status = 422, description = "Empty update, invalid drink or duplicate title", body = ErrorResponse)
    ),
    tag = "Drinks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(subject = auth.subject().unwrap_or("unknown")))]
pub async fn update_drink(
    State(state): State<AppState>,
    RequireDrinksUpdate(auth): RequireDrinksUpdate,
    DrinkId(id): DrinkId,
    ValidatedJson(dto): ValidatedJson<UpdateDrinkDto>,
) -> Result<Json<LongDrinksResponse>, AppError> {
    let drink = DrinkService::update_drink(state.drinks.as_ref(), id, dto).await?;
    Ok(Json(drink))
}

#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    params(("id" = i32, Path, description = "Drink ID")),
    responses(
        (status = 200, description = "Drink deleted", body = DeleteDrinkResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires delete:drinks permission", body = ErrorResponse),
        (status = 404, description = "Drink not found", body = ErrorResponse)
    ),
    tag = "Drinks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(subject = auth.subject().unwrap_or("unknown")))]
pub async fn delete_drink(
    State(state): State<AppState>,
    RequireDrinksDelete(auth): RequireDrinksDelete,
    DrinkId(id): DrinkId,
) -> Result<Json<DeleteDrinkResponse>, AppError> {
    let deleted = DrinkService::delete_drink(state.drinks.as_ref(), id).await?;
    Ok(Json(deleted))
}
