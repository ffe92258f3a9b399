use sqlx::SqlitePool;
use time::Date;
use tracing::{debug, info, instrument};

use super::dto::{CreateLogRequest, DailySummary, SummaryEntry};
use super::repo;
use super::repo_types::{DailyLogEntry, NewLogEntry};
use crate::error::{AppError, AppResult};
use crate::nutrition::{loader, Catalog, Loggable, NutritionResult, Resolver};
use crate::validate::{positive, required};

/// Record a consumption event, freezing the resolved grams.
///
/// Meals always log their full mass; `quantity` and `unit_name` are stored
/// as given but do not scale it.
#[instrument(skip(db))]
pub async fn log_consumption(db: &SqlitePool, req: CreateLogRequest) -> AppResult<DailyLogEntry> {
    let quantity = positive("quantity", req.quantity)?;
    let unit_name = required("unit_name", &req.unit_name)?;
    let loggable = Loggable::new(req.loggable_type, req.loggable_id);

    let mut tx = db.begin().await?;
    let snapshot = loader::load_snapshot(&mut tx, &[loggable]).await?;
    if !snapshot.contains(loggable) {
        return Err(AppError::not_found(loggable.entity_name(), loggable.id()));
    }
    let grams = Resolver::new(&snapshot)
        .nutrition(loggable, quantity, unit_name)
        .weight_grams;

    let row = repo::insert_log(
        &mut tx,
        &NewLogEntry {
            log_date: req.log_date,
            loggable,
            quantity,
            unit_name: unit_name.to_string(),
            grams,
        },
    )
    .await?;
    tx.commit().await?;

    info!(log_id = row.id, ?loggable, grams, "consumption logged");
    Ok(DailyLogEntry {
        id: row.id,
        log_date: row.log_date,
        loggable,
        quantity: row.quantity,
        unit_name: row.unit_name,
        grams: row.grams,
    })
}

#[instrument(skip(db))]
pub async fn logs_for_date(db: &SqlitePool, date: Date) -> AppResult<Vec<DailyLogEntry>> {
    let mut conn = db.acquire().await?;
    Ok(repo::list_by_date(&mut conn, date).await?)
}

/// Entries of a day with nutrition recomputed from the frozen grams.
#[instrument(skip(db))]
pub async fn daily_summary(db: &SqlitePool, date: Date, calorie_goal: f64) -> AppResult<DailySummary> {
    let mut tx = db.begin().await?;
    let entries = repo::list_by_date(&mut tx, date).await?;
    let roots: Vec<Loggable> = entries.iter().map(|e| e.loggable).collect();
    let snapshot = loader::load_snapshot(&mut tx, &roots).await?;
    tx.commit().await?;

    let resolver = Resolver::new(&snapshot);
    let entries: Vec<SummaryEntry> = entries
        .into_iter()
        .map(|entry| {
            let nutrition = resolver.nutrition_for_grams(entry.loggable, entry.grams);
            let name = snapshot.display_name(entry.loggable).map(str::to_owned);
            SummaryEntry {
                entry,
                name,
                nutrition,
            }
        })
        .collect();
    let totals: NutritionResult = entries.iter().map(|e| e.nutrition).sum();

    debug!(%date, entries = entries.len(), calories = totals.calories, "daily summary built");
    Ok(DailySummary {
        date,
        remaining_calories: calorie_goal - totals.calories,
        entries,
        totals,
        calorie_goal,
    })
}
