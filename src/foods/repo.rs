use std::collections::HashMap;

use sqlx::SqliteConnection;

use super::repo_types::{unit_key, Food, FoodRow, FoodUnit, NewFood};

const FOOD_COLUMNS: &str = r#"
    id, name, category, is_liquid, is_active,
    calories_100g, proteins_100g, carbs_100g, fats_100g,
    saturated_fats_100g, trans_fats_100g, fiber_100g, sodium_100g, sugar_100g
"#;

pub async fn insert_food(conn: &mut SqliteConnection, food: &NewFood) -> sqlx::Result<FoodRow> {
    let sql = format!(
        r#"
        INSERT INTO foods (
            name, category, is_liquid, is_active,
            calories_100g, proteins_100g, carbs_100g, fats_100g,
            saturated_fats_100g, trans_fats_100g, fiber_100g, sodium_100g, sugar_100g
        )
        VALUES ($1, $2, $3, 1, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {FOOD_COLUMNS}
        "#
    );
    let p = &food.per_100g;
    sqlx::query_as::<_, FoodRow>(&sql)
        .bind(&food.name)
        .bind(&food.category)
        .bind(food.is_liquid)
        .bind(p.calories)
        .bind(p.proteins)
        .bind(p.carbs)
        .bind(p.fats)
        .bind(p.saturated_fats)
        .bind(p.trans_fats)
        .bind(p.fiber)
        .bind(p.sodium)
        .bind(p.sugar)
        .fetch_one(&mut *conn)
        .await
}

/// Insert a unit, or update the grams of the unit with the same
/// [`unit_key`]. The first spelling of the name is kept.
pub async fn upsert_unit(
    conn: &mut SqliteConnection,
    food_id: i64,
    unit_name: &str,
    grams: f64,
) -> sqlx::Result<FoodUnit> {
    sqlx::query_as::<_, FoodUnit>(
        r#"
        INSERT INTO food_units (food_id, unit_name, unit_key, grams)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (food_id, unit_key) DO UPDATE SET grams = excluded.grams
        RETURNING id, food_id, unit_name, grams
        "#,
    )
    .bind(food_id)
    .bind(unit_name)
    .bind(unit_key(unit_name))
    .bind(grams)
    .fetch_one(&mut *conn)
    .await
}

pub async fn list_units(conn: &mut SqliteConnection, food_id: i64) -> sqlx::Result<Vec<FoodUnit>> {
    sqlx::query_as::<_, FoodUnit>(
        r#"
        SELECT id, food_id, unit_name, grams
        FROM food_units
        WHERE food_id = $1
        ORDER BY id
        "#,
    )
    .bind(food_id)
    .fetch_all(&mut *conn)
    .await
}

/// Food with its units, whether active or not.
pub async fn find_food(conn: &mut SqliteConnection, food_id: i64) -> sqlx::Result<Option<Food>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1");
    let row = sqlx::query_as::<_, FoodRow>(&sql)
        .bind(food_id)
        .fetch_optional(&mut *conn)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let units = list_units(conn, food_id).await?;
    Ok(Some(Food::from_row(row, units)))
}

pub async fn food_exists(conn: &mut SqliteConnection, food_id: i64) -> sqlx::Result<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM foods WHERE id = $1")
        .bind(food_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

pub async fn list_active(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Food>> {
    let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE is_active = 1 ORDER BY name, id");
    let rows = sqlx::query_as::<_, FoodRow>(&sql)
        .fetch_all(&mut *conn)
        .await?;

    let units = sqlx::query_as::<_, FoodUnit>(
        r#"
        SELECT u.id, u.food_id, u.unit_name, u.grams
        FROM food_units u
        JOIN foods f ON f.id = u.food_id
        WHERE f.is_active = 1
        ORDER BY u.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut by_food: HashMap<i64, Vec<FoodUnit>> = HashMap::new();
    for unit in units {
        by_food.entry(unit.food_id).or_default().push(unit);
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let units = by_food.remove(&row.id).unwrap_or_default();
            Food::from_row(row, units)
        })
        .collect())
}

/// Flip the active flag; returns false when the food does not exist.
pub async fn set_active(
    conn: &mut SqliteConnection,
    food_id: i64,
    active: bool,
) -> sqlx::Result<bool> {
    let res = sqlx::query("UPDATE foods SET is_active = $1 WHERE id = $2")
        .bind(active)
        .bind(food_id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected() > 0)
}
