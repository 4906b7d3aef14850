use tracing::{info, instrument};

use coffeeshop_core::AppError;
use coffeeshop_observability::track_drink_mutation;

use crate::modules::drinks::model::{
    CreateDrinkDto, DeleteDrinkResponse, Drink, LongDrinksResponse, ShortDrinksResponse,
    UpdateDrinkDto, drink_not_found,
};
use crate::modules::drinks::repository::DrinkRepository;

pub struct DrinkService;

impl DrinkService {
    #[instrument(skip(repo))]
    pub async fn get_drinks(repo: &dyn DrinkRepository) -> Result<ShortDrinksResponse, AppError> {
        let drinks = repo.list().await?;

        Ok(ShortDrinksResponse {
            success: true,
            drinks: drinks.iter().map(Drink::short).collect(),
        })
    }

    #[instrument(skip(repo))]
    pub async fn get_drinks_detail(
        repo: &dyn DrinkRepository,
    ) -> Result<LongDrinksResponse, AppError> {
        let drinks = repo.list().await?;

        Ok(LongDrinksResponse {
            success: true,
            drinks: drinks.iter().map(Drink::long).collect(),
        })
    }

    #[instrument(skip(repo))]
    pub async fn create_drink(
        repo: &dyn DrinkRepository,
        dto: CreateDrinkDto,
    ) -> Result<LongDrinksResponse, AppError> {
        let drink = repo.create(&dto.title, &dto.recipe).await?;
        track_drink_mutation("create");
        info!(drink_id = drink.id, title = %drink.title, "Drink created");

        Ok(LongDrinksResponse::single(&drink))
    }

    #[instrument(skip(repo))]
    pub async fn update_drink(
        repo: &dyn DrinkRepository,
        id: i32,
        dto: UpdateDrinkDto,
    ) -> Result<LongDrinksResponse, AppError> {
        let drink = repo.update(id, &dto).await?.ok_or_else(drink_not_found)?;
        track_drink_mutation("update");
        info!(drink_id = drink.id, "Drink updated");

        Ok(LongDrinksResponse::single(&drink))
    }

    #[instrument(skip(repo))]
    pub async fn delete_drink(
        repo: &dyn DrinkRepository,
        id: i32,
    ) -> Result<DeleteDrinkResponse, AppError> {
        if !repo.delete(id).await? {
            return Err(drink_not_found());
        }
        track_drink_mutation("delete");
        info!(drink_id = id, "Drink deleted");

        Ok(DeleteDrinkResponse {
            success: true,
            drinks: id,
        })
    }
}
