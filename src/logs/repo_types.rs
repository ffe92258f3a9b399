use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use super::iso_date;
use crate::nutrition::Loggable;

#[derive(Debug, FromRow)]
pub struct DailyLogRow {
    pub id: i64,
    pub log_date: Date,
    pub food_id: Option<i64>,
    pub recipe_id: Option<i64>,
    pub meal_id: Option<i64>,
    pub quantity: f64,
    pub unit_name: String,
    pub grams: f64,
}

/// A consumption event with its mass frozen at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub id: i64,
    #[serde(with = "iso_date")]
    pub log_date: Date,
    pub loggable: Loggable,
    pub quantity: f64,
    pub unit_name: String,
    pub grams: f64,
}

impl DailyLogRow {
    pub fn into_entry(self) -> Option<DailyLogEntry> {
        let loggable = Loggable::from_refs(self.food_id, self.recipe_id, self.meal_id)?;
        Some(DailyLogEntry {
            id: self.id,
            log_date: self.log_date,
            loggable,
            quantity: self.quantity,
            unit_name: self.unit_name,
            grams: self.grams,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub log_date: Date,
    pub loggable: Loggable,
    pub quantity: f64,
    pub unit_name: String,
    pub grams: f64,
}
