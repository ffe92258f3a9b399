use tracing::debug;

use crate::foods::Food;

/// Units that are gram-equivalent by definition.
pub const IDENTITY_UNITS: [&str; 2] = ["g", "ml"];

/// Grams assumed for a unit the food has not registered.
pub const FALLBACK_GRAMS_PER_UNIT: f64 = 100.0;

pub fn is_identity_unit(unit_name: &str) -> bool {
    IDENTITY_UNITS
        .iter()
        .any(|u| u.eq_ignore_ascii_case(unit_name))
}

/// Mass in grams of `quantity` `unit_name` of `food`.
///
/// A missing food resolves to zero. Unregistered units fall back to
/// [`FALLBACK_GRAMS_PER_UNIT`] instead of failing.
pub fn resolve_grams(food: Option<&Food>, quantity: f64, unit_name: &str) -> f64 {
    let Some(food) = food else {
        return 0.0;
    };
    if is_identity_unit(unit_name) {
        return quantity;
    }
    let grams_per_unit = match food.grams_per_unit(unit_name) {
        Some(grams) => grams,
        None => {
            debug!(
                food_id = food.id,
                unit = unit_name,
                fallback_grams = FALLBACK_GRAMS_PER_UNIT,
                "unit not registered for food"
            );
            FALLBACK_GRAMS_PER_UNIT
        }
    };
    quantity * grams_per_unit
}

#[cfg(test)]
mod units_tests {
    use super::*;
    use crate::foods::FoodUnit;
    use crate::nutrition::NutrientProfile;

    fn bread() -> Food {
        Food {
            id: 1,
            name: "Bread".into(),
            category: "Bakery".into(),
            is_liquid: false,
            is_active: true,
            per_100g: NutrientProfile::default(),
            units: vec![FoodUnit {
                id: 1,
                food_id: 1,
                unit_name: "Slice".into(),
                grams: 25.0,
            }],
        }
    }

    #[test]
    fn unregistered_unit_falls_back_to_hundred_grams() {
        assert_eq!(resolve_grams(Some(&bread()), 2.0, "scoop"), 200.0);
    }

    #[test]
    fn identity_units_return_quantity() {
        let food = bread();
        for q in [0.0, 1.0, 37.5, 1000.0] {
            assert_eq!(resolve_grams(Some(&food), q, "g"), q);
            assert_eq!(resolve_grams(Some(&food), q, "ml"), q);
            assert_eq!(resolve_grams(Some(&food), q, "ML"), q);
        }
    }

    #[test]
    fn registered_unit_is_matched_case_insensitively() {
        let food = bread();
        assert_eq!(resolve_grams(Some(&food), 3.0, "slice"), 75.0);
        assert_eq!(resolve_grams(Some(&food), 3.0, "SLICE"), 75.0);
    }

    #[test]
    fn identity_units_ignore_registered_overrides() {
        let mut food = bread();
        food.units.push(FoodUnit {
            id: 2,
            food_id: 1,
            unit_name: "g".into(),
            grams: 5.0,
        });
        assert_eq!(resolve_grams(Some(&food), 10.0, "g"), 10.0);
    }

    #[test]
    fn missing_food_resolves_to_zero() {
        assert_eq!(resolve_grams(None, 2.0, "slice"), 0.0);
        assert_eq!(resolve_grams(None, 2.0, "g"), 0.0);
    }
}
