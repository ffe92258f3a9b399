//! Nutrition resolution engine.
//!
//! Converts a food, recipe or meal reference expressed in an arbitrary unit
//! into grams and absolute nutrient totals. The engine itself is synchronous
//! and reads from a [`Catalog`]; [`loader`] fills a [`Snapshot`] from the
//! database before each computation.

mod catalog;
pub mod loader;
mod profile;
mod resolver;
pub mod units;

pub use catalog::{Catalog, Loggable, LoggableType, Snapshot};
pub use profile::{scale, NutrientProfile, NutritionResult};
pub use resolver::{Resolver, PORTION_UNIT};
