use sqlx::SqliteConnection;
use tracing::warn;

use super::repo_types::{Meal, MealItem, MealItemRow, MealItemSource, MealRow};

pub async fn insert_meal(conn: &mut SqliteConnection, name: &str) -> sqlx::Result<MealRow> {
    sqlx::query_as::<_, MealRow>(
        r#"
        INSERT INTO meals (name, is_active)
        VALUES ($1, 1)
        RETURNING id, name, is_active
        "#,
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    meal_id: i64,
    source: MealItemSource,
    quantity: f64,
    unit_name: &str,
) -> sqlx::Result<MealItemRow> {
    sqlx::query_as::<_, MealItemRow>(
        r#"
        INSERT INTO meal_items (meal_id, food_id, recipe_id, quantity, unit_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, meal_id, food_id, recipe_id, quantity, unit_name
        "#,
    )
    .bind(meal_id)
    .bind(source.food_id())
    .bind(source.recipe_id())
    .bind(quantity)
    .bind(unit_name)
    .fetch_one(&mut *conn)
    .await
}

pub async fn list_items(conn: &mut SqliteConnection, meal_id: i64) -> sqlx::Result<Vec<MealItem>> {
    let rows = sqlx::query_as::<_, MealItemRow>(
        r#"
        SELECT id, meal_id, food_id, recipe_id, quantity, unit_name
        FROM meal_items
        WHERE meal_id = $1
        ORDER BY id
        "#,
    )
    .bind(meal_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            let item = row.into_item();
            if item.is_none() {
                warn!(meal_id, item_id = id, "meal item without a single source skipped");
            }
            item
        })
        .collect())
}

pub async fn find_meal(conn: &mut SqliteConnection, meal_id: i64) -> sqlx::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, MealRow>("SELECT id, name, is_active FROM meals WHERE id = $1")
        .bind(meal_id)
        .fetch_optional(&mut *conn)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let items = list_items(conn, meal_id).await?;
    Ok(Some(Meal::from_row(row, items)))
}

pub async fn meal_exists(conn: &mut SqliteConnection, meal_id: i64) -> sqlx::Result<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM meals WHERE id = $1")
        .bind(meal_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Active meals with their items.
pub async fn list_active(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, MealRow>(
        r#"
        SELECT id, name, is_active
        FROM meals
        WHERE is_active = 1
        ORDER BY name, id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut meals = Vec::with_capacity(rows.len());
    for row in rows {
        let items = list_items(conn, row.id).await?;
        meals.push(Meal::from_row(row, items));
    }
    Ok(meals)
}

pub async fn set_active(
    conn: &mut SqliteConnection,
    meal_id: i64,
    active: bool,
) -> sqlx::Result<bool> {
    let res = sqlx::query("UPDATE meals SET is_active = $1 WHERE id = $2")
        .bind(active)
        .bind(meal_id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected() > 0)
}
