//! Drink persistence.
//!
//! Handlers reach storage only through [`DrinkRepository`], so the HTTP
//! surface can be exercised against [`InMemoryDrinkRepository`] without a
//! database.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use coffeeshop_core::AppError;

use crate::modules::drinks::model::{Drink, Ingredient, UpdateDrinkDto};

#[async_trait]
pub trait DrinkRepository: Send + Sync {
    /// All drinks in id order.
    async fn list(&self) -> Result<Vec<Drink>, AppError>;

    async fn find(&self, id: i32) -> Result<Option<Drink>, AppError>;

    /// Inserts a drink. A duplicate title is rejected as unprocessable.
    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, AppError>;

    /// Applies the fields present in `dto`. `None` when no drink has `id`.
    async fn update(&self, id: i32, dto: &UpdateDrinkDto) -> Result<Option<Drink>, AppError>;

    /// Returns whether a drink was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

fn duplicate_title() -> AppError {
    AppError::unprocessable(anyhow!("A drink with this title already exists"))
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return duplicate_title();
    }
    AppError::database(e)
}

#[derive(Debug, Clone)]
pub struct PgDrinkRepository {
    db: PgPool,
}

impl PgDrinkRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DrinkRepository for PgDrinkRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Drink>, AppError> {
        sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: i32) -> Result<Option<Drink>, AppError> {
        sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, AppError> {
        sqlx::query_as::<_, Drink>(
            r#"INSERT INTO drinks (title, recipe)
               VALUES ($1, $2)
               RETURNING id, title, recipe"#,
        )
        .bind(title)
        .bind(Json(recipe))
        .fetch_one(&self.db)
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i32, dto: &UpdateDrinkDto) -> Result<Option<Drink>, AppError> {
        sqlx::query_as::<_, Drink>(
            r#"UPDATE drinks
               SET title = COALESCE($2, title),
                   recipe = COALESCE($3, recipe)
               WHERE id = $1
               RETURNING id, title, recipe"#,
        )
        .bind(id)
        .bind(dto.title.as_deref())
        .bind(dto.recipe.as_ref().map(Json))
        .fetch_optional(&self.db)
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryDrinkRepository;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use super::{DrinkRepository, duplicate_title};
    use crate::modules::drinks::model::{Drink, Ingredient, UpdateDrinkDto};
    use coffeeshop_core::AppError;

    #[derive(Debug, Default)]
    struct Store {
        next_id: i32,
        drinks: BTreeMap<i32, Drink>,
    }

    /// Map-backed repository with the same id and uniqueness rules as the
    /// `drinks` table.
    #[derive(Debug, Default)]
    pub struct InMemoryDrinkRepository {
        store: RwLock<Store>,
    }

    impl InMemoryDrinkRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Repository pre-filled with `drinks`, ids assigned from 1.
        pub fn with_drinks(drinks: Vec<(&str, Vec<Ingredient>)>) -> Self {
            let mut store = Store::default();
            for (title, recipe) in drinks {
                store.next_id += 1;
                let id = store.next_id;
                store.drinks.insert(id, Drink::new(id, title, recipe));
            }
            Self {
                store: RwLock::new(store),
            }
        }
    }

    fn title_taken(store: &Store, title: &str, except: Option<i32>) -> bool {
        store
            .drinks
            .values()
            .any(|d| d.title == title && Some(d.id) != except)
    }

    #[async_trait]
    impl DrinkRepository for InMemoryDrinkRepository {
        async fn list(&self) -> Result<Vec<Drink>, AppError> {
            Ok(self.store.read().await.drinks.values().cloned().collect())
        }

        async fn find(&self, id: i32) -> Result<Option<Drink>, AppError> {
            Ok(self.store.read().await.drinks.get(&id).cloned())
        }

        async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, AppError> {
            let mut store = self.store.write().await;
            if title_taken(&store, title, None) {
                return Err(duplicate_title());
            }

            store.next_id += 1;
            let drink = Drink::new(store.next_id, title, recipe.to_vec());
            store.drinks.insert(drink.id, drink.clone());
            Ok(drink)
        }

        async fn update(&self, id: i32, dto: &UpdateDrinkDto) -> Result<Option<Drink>, AppError> {
            let mut store = self.store.write().await;
            if !store.drinks.contains_key(&id) {
                return Ok(None);
            }
            if let Some(title) = &dto.title
                && title_taken(&store, title, Some(id))
            {
                return Err(duplicate_title());
            }

            let Some(drink) = store.drinks.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(title) = &dto.title {
                drink.title = title.clone();
            }
            if let Some(recipe) = &dto.recipe {
                drink.recipe.0 = recipe.clone();
            }
            Ok(Some(drink.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, AppError> {
            Ok(self.store.write().await.drinks.remove(&id).is_some())
        }
    }
}
