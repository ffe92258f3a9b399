use serde::{Deserialize, Serialize};
use time::Date;

use super::iso_date;
use super::repo_types::DailyLogEntry;
use crate::nutrition::{LoggableType, NutritionResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLogRequest {
    #[serde(with = "iso_date")]
    pub log_date: Date,
    pub loggable_type: LoggableType,
    pub loggable_id: i64,
    pub quantity: f64,
    pub unit_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// One log entry with its name and nutrition recomputed from current data.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    #[serde(flatten)]
    pub entry: DailyLogEntry,
    pub name: Option<String>,
    pub nutrition: NutritionResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub entries: Vec<SummaryEntry>,
    pub totals: NutritionResult,
    pub calorie_goal: f64,
    pub remaining_calories: f64,
}
