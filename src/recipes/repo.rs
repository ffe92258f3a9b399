use sqlx::SqliteConnection;

use super::repo_types::{Recipe, RecipeIngredient, RecipeRow};

pub async fn insert_recipe(
    conn: &mut SqliteConnection,
    name: &str,
    portions_yield: i64,
) -> sqlx::Result<RecipeRow> {
    sqlx::query_as::<_, RecipeRow>(
        r#"
        INSERT INTO recipes (name, portions_yield, is_active)
        VALUES ($1, $2, 1)
        RETURNING id, name, portions_yield, is_active
        "#,
    )
    .bind(name)
    .bind(portions_yield)
    .fetch_one(&mut *conn)
    .await
}

pub async fn insert_ingredient(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    food_id: i64,
    quantity: f64,
    unit_name: &str,
) -> sqlx::Result<RecipeIngredient> {
    sqlx::query_as::<_, RecipeIngredient>(
        r#"
        INSERT INTO recipe_ingredients (recipe_id, food_id, quantity, unit_name)
        VALUES ($1, $2, $3, $4)
        RETURNING id, recipe_id, food_id, quantity, unit_name
        "#,
    )
    .bind(recipe_id)
    .bind(food_id)
    .bind(quantity)
    .bind(unit_name)
    .fetch_one(&mut *conn)
    .await
}

pub async fn list_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> sqlx::Result<Vec<RecipeIngredient>> {
    sqlx::query_as::<_, RecipeIngredient>(
        r#"
        SELECT id, recipe_id, food_id, quantity, unit_name
        FROM recipe_ingredients
        WHERE recipe_id = $1
        ORDER BY id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&mut *conn)
    .await
}

pub async fn find_recipe(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> sqlx::Result<Option<Recipe>> {
    let row = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, name, portions_yield, is_active FROM recipes WHERE id = $1",
    )
    .bind(recipe_id)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let ingredients = list_ingredients(conn, recipe_id).await?;
    Ok(Some(Recipe::from_row(row, ingredients)))
}

pub async fn recipe_exists(conn: &mut SqliteConnection, recipe_id: i64) -> sqlx::Result<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Active recipes with their ingredients.
pub async fn list_active(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, RecipeRow>(
        r#"
        SELECT id, name, portions_yield, is_active
        FROM recipes
        WHERE is_active = 1
        ORDER BY name, id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut recipes = Vec::with_capacity(rows.len());
    for row in rows {
        let ingredients = list_ingredients(conn, row.id).await?;
        recipes.push(Recipe::from_row(row, ingredients));
    }
    Ok(recipes)
}

pub async fn set_active(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    active: bool,
) -> sqlx::Result<bool> {
    let res = sqlx::query("UPDATE recipes SET is_active = $1 WHERE id = $2")
        .bind(active)
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected() > 0)
}
