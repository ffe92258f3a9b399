//! Bulk food registration from a CSV table.
//!
//! Each record becomes one food registered per `porcao` grams, plus its
//! household unit when `tipo_quantidade` is filled in. Records are written
//! one transaction at a time; a failing record is logged and counted, and
//! the import moves on.

use std::io::Read;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::error::AppResult;
use crate::foods::dto::{CreateFoodRequest, UnitRequest};
use crate::foods::{services, Food};
use crate::nutrition::NutrientProfile;

const IMPORT_CATEGORY: &str = "Food";
const IMPORT_BASE_UNIT: &str = "g";

#[derive(Debug, Clone, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "porcao")]
    pub portion_grams: f64,
    #[serde(rename = "kcal")]
    pub calories: f64,
    #[serde(rename = "proteina")]
    pub proteins: f64,
    #[serde(rename = "carboidrato")]
    pub carbs: f64,
    #[serde(rename = "gordura")]
    pub fats: f64,
    #[serde(rename = "gordura_saturada", default)]
    pub saturated_fats: Option<f64>,
    #[serde(rename = "gordura_trans", default)]
    pub trans_fats: Option<f64>,
    #[serde(rename = "fibra", default)]
    pub fiber: Option<f64>,
    #[serde(rename = "sodio_mg", default)]
    pub sodium: Option<f64>,
    #[serde(rename = "acucar_total", default)]
    pub sugar: Option<f64>,
    #[serde(rename = "peso_g", default)]
    pub unit_grams: Option<f64>,
    #[serde(rename = "tipo_quantidade", default)]
    pub unit_name: Option<String>,
}

impl FoodRecord {
    pub fn into_request(self) -> CreateFoodRequest {
        let serving_unit = match (self.unit_name, self.unit_grams) {
            (Some(name), Some(grams)) if !name.trim().is_empty() => Some(UnitRequest {
                unit_name: name,
                grams,
            }),
            _ => None,
        };
        CreateFoodRequest {
            name: self.name,
            category: IMPORT_CATEGORY.into(),
            base_unit: IMPORT_BASE_UNIT.into(),
            base_quantity: self.portion_grams,
            nutrients: NutrientProfile {
                calories: self.calories,
                proteins: self.proteins,
                carbs: self.carbs,
                fats: self.fats,
                saturated_fats: self.saturated_fats,
                trans_fats: self.trans_fats,
                fiber: self.fiber,
                sodium: self.sodium,
                sugar: self.sugar,
            },
            serving_unit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

pub async fn import_record(db: &SqlitePool, record: FoodRecord) -> AppResult<Food> {
    services::create_food(db, record.into_request()).await
}

/// Import every record of a CSV table with a header row.
#[instrument(skip(db, input))]
pub async fn import_csv<R: Read>(db: &SqlitePool, input: R) -> anyhow::Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut report = ImportReport::default();

    for (index, record) in reader.deserialize::<FoodRecord>().enumerate() {
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(line, error = %e, "unreadable record skipped");
                report.failed += 1;
                continue;
            }
        };
        let name = record.name.clone();
        match import_record(db, record).await {
            Ok(food) => {
                report.imported += 1;
                info!(line, food_id = food.id, %name, "food imported");
            }
            Err(e) => {
                report.failed += 1;
                warn!(line, %name, error = %e, "food import failed");
            }
        }
    }

    info!(imported = report.imported, failed = report.failed, "import finished");
    Ok(report)
}
