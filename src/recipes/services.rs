use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::dto::{AddIngredientRequest, CreateRecipeRequest};
use super::repo;
use super::repo_types::{Recipe, RecipeIngredient};
use crate::error::{AppError, AppResult};
use crate::foods;
use crate::nutrition::{loader, Loggable, NutritionResult, Resolver};
use crate::validate::{positive, required};

#[instrument(skip(db, req), fields(name = %req.name))]
pub async fn create_recipe(db: &SqlitePool, req: CreateRecipeRequest) -> AppResult<Recipe> {
    let name = required("name", &req.name)?;
    if req.portions_yield <= 0 {
        return Err(AppError::validation("portions_yield must be at least 1"));
    }

    let mut tx = db.begin().await?;
    let row = repo::insert_recipe(&mut tx, name, req.portions_yield).await?;
    tx.commit().await?;

    info!(recipe_id = row.id, portions = row.portions_yield, "recipe created");
    Ok(Recipe::from_row(row, Vec::new()))
}

/// Append an ingredient; both the recipe and the food must exist.
#[instrument(skip(db))]
pub async fn add_ingredient(
    db: &SqlitePool,
    recipe_id: i64,
    req: AddIngredientRequest,
) -> AppResult<RecipeIngredient> {
    let quantity = positive("quantity", req.quantity)?;
    let unit_name = required("unit_name", &req.unit_name)?;

    let mut tx = db.begin().await?;
    if !repo::recipe_exists(&mut tx, recipe_id).await? {
        return Err(AppError::not_found("recipe", recipe_id));
    }
    if !foods::repo::food_exists(&mut tx, req.food_id).await? {
        return Err(AppError::not_found("food", req.food_id));
    }
    let ingredient =
        repo::insert_ingredient(&mut tx, recipe_id, req.food_id, quantity, unit_name).await?;
    tx.commit().await?;

    info!(recipe_id, food_id = req.food_id, "ingredient added");
    Ok(ingredient)
}

#[instrument(skip(db))]
pub async fn get_recipe(db: &SqlitePool, recipe_id: i64) -> AppResult<Recipe> {
    let mut conn = db.acquire().await?;
    repo::find_recipe(&mut conn, recipe_id)
        .await?
        .ok_or(AppError::not_found("recipe", recipe_id))
}

#[instrument(skip(db))]
pub async fn list_active_recipes(db: &SqlitePool) -> AppResult<Vec<Recipe>> {
    let mut conn = db.acquire().await?;
    Ok(repo::list_active(&mut conn).await?)
}

#[instrument(skip(db))]
pub async fn deactivate_recipe(db: &SqlitePool, recipe_id: i64) -> AppResult<()> {
    let mut tx = db.begin().await?;
    if !repo::set_active(&mut tx, recipe_id, false).await? {
        return Err(AppError::not_found("recipe", recipe_id));
    }
    tx.commit().await?;
    info!(recipe_id, "recipe deactivated");
    Ok(())
}

#[instrument(skip(db))]
pub async fn recipe_nutrition(
    db: &SqlitePool,
    recipe_id: i64,
    quantity: f64,
    unit: &str,
) -> AppResult<NutritionResult> {
    let snapshot = loader::snapshot(db, &[Loggable::Recipe(recipe_id)]).await?;
    Ok(Resolver::new(&snapshot).recipe_nutrition(recipe_id, quantity, unit))
}

#[cfg(test)]
mod recipe_service_tests {
    use super::*;
    use crate::foods::dto::CreateFoodRequest;
    use crate::nutrition::NutrientProfile;
    use crate::state::AppState;

    async fn food(db: &SqlitePool, name: &str, calories: f64) -> i64 {
        foods::services::create_food(
            db,
            CreateFoodRequest {
                name: name.into(),
                category: "Test".into(),
                base_unit: "g".into(),
                base_quantity: 100.0,
                nutrients: NutrientProfile {
                    calories,
                    ..Default::default()
                },
                serving_unit: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn ingredient(food_id: i64, quantity: f64, unit_name: &str) -> AddIngredientRequest {
        AddIngredientRequest {
            food_id,
            quantity,
            unit_name: unit_name.into(),
        }
    }

    #[tokio::test]
    async fn portions_yield_must_be_positive() {
        let state = AppState::in_memory().await.unwrap();
        for portions in [0, -2] {
            let err = create_recipe(
                &state.db,
                CreateRecipeRequest {
                    name: "Soup".into(),
                    portions_yield: portions,
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn add_ingredient_checks_recipe_food_and_quantity() {
        let state = AppState::in_memory().await.unwrap();
        let rice = food(&state.db, "Rice", 130.0).await;
        let recipe = create_recipe(
            &state.db,
            CreateRecipeRequest {
                name: "Rice bowl".into(),
                portions_yield: 2,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            add_ingredient(&state.db, 99, ingredient(rice, 100.0, "g")).await,
            Err(AppError::NotFound { entity: "recipe", .. })
        ));
        assert!(matches!(
            add_ingredient(&state.db, recipe.id, ingredient(404, 100.0, "g")).await,
            Err(AppError::NotFound { entity: "food", .. })
        ));
        assert!(matches!(
            add_ingredient(&state.db, recipe.id, ingredient(rice, 0.0, "g")).await,
            Err(AppError::Validation(_))
        ));

        add_ingredient(&state.db, recipe.id, ingredient(rice, 300.0, "g"))
            .await
            .unwrap();
        let stored = get_recipe(&state.db, recipe.id).await.unwrap();
        assert_eq!(stored.ingredients.len(), 1);
        assert_eq!(stored.ingredients[0].food_id, rice);
    }

    #[tokio::test]
    async fn nutrition_is_per_portion() {
        let state = AppState::in_memory().await.unwrap();
        let rice = food(&state.db, "Rice", 130.0).await;
        let beans = food(&state.db, "Beans", 76.0).await;
        let recipe = create_recipe(
            &state.db,
            CreateRecipeRequest {
                name: "Rice and beans".into(),
                portions_yield: 4,
            },
        )
        .await
        .unwrap();
        add_ingredient(&state.db, recipe.id, ingredient(rice, 400.0, "g"))
            .await
            .unwrap();
        add_ingredient(&state.db, recipe.id, ingredient(beans, 200.0, "g"))
            .await
            .unwrap();

        let one = recipe_nutrition(&state.db, recipe.id, 1.0, "portion").await.unwrap();
        assert!((one.weight_grams - 150.0).abs() < 1e-9);
        assert!((one.calories - (520.0 + 152.0) / 4.0).abs() < 1e-9);

        let two = recipe_nutrition(&state.db, recipe.id, 2.0, "bowl").await.unwrap();
        assert!((two.calories - 2.0 * one.calories).abs() < 1e-9);

        let empty = recipe_nutrition(&state.db, 12345, 1.0, "portion").await.unwrap();
        assert_eq!(empty, NutritionResult::zero());
    }

    #[tokio::test]
    async fn deactivated_recipes_still_resolve() {
        let state = AppState::in_memory().await.unwrap();
        let oats = food(&state.db, "Oats", 389.0).await;
        let recipe = create_recipe(
            &state.db,
            CreateRecipeRequest {
                name: "Porridge".into(),
                portions_yield: 1,
            },
        )
        .await
        .unwrap();
        add_ingredient(&state.db, recipe.id, ingredient(oats, 50.0, "g"))
            .await
            .unwrap();

        deactivate_recipe(&state.db, recipe.id).await.unwrap();

        assert!(list_active_recipes(&state.db).await.unwrap().is_empty());
        let n = recipe_nutrition(&state.db, recipe.id, 1.0, "portion").await.unwrap();
        assert!((n.calories - 194.5).abs() < 1e-9);
    }
}
