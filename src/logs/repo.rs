use sqlx::SqliteConnection;
use time::Date;
use tracing::warn;

use super::repo_types::{DailyLogEntry, DailyLogRow, NewLogEntry};

const LOG_COLUMNS: &str = "id, log_date, food_id, recipe_id, meal_id, quantity, unit_name, grams";

pub async fn insert_log(
    conn: &mut SqliteConnection,
    entry: &NewLogEntry,
) -> sqlx::Result<DailyLogRow> {
    let sql = format!(
        r#"
        INSERT INTO daily_logs (log_date, food_id, recipe_id, meal_id, quantity, unit_name, grams)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {LOG_COLUMNS}
        "#
    );
    sqlx::query_as::<_, DailyLogRow>(&sql)
        .bind(entry.log_date)
        .bind(entry.loggable.food_id())
        .bind(entry.loggable.recipe_id())
        .bind(entry.loggable.meal_id())
        .bind(entry.quantity)
        .bind(&entry.unit_name)
        .bind(entry.grams)
        .fetch_one(&mut *conn)
        .await
}

pub async fn list_by_date(
    conn: &mut SqliteConnection,
    log_date: Date,
) -> sqlx::Result<Vec<DailyLogEntry>> {
    let sql = format!("SELECT {LOG_COLUMNS} FROM daily_logs WHERE log_date = $1 ORDER BY id");
    let rows = sqlx::query_as::<_, DailyLogRow>(&sql)
        .bind(log_date)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            let entry = row.into_entry();
            if entry.is_none() {
                warn!(log_id = id, "log entry without a single loggable skipped");
            }
            entry
        })
        .collect())
}
