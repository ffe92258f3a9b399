use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Nutrient values of a food, stored per 100 grams.
///
/// The secondary nutrients are optional; an absent value counts as zero
/// whenever the profile is scaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(default)]
    pub saturated_fats: Option<f64>,
    #[serde(default)]
    pub trans_fats: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
}

impl NutrientProfile {
    /// Rescale raw values given for `base_quantity` grams to the per-100g form.
    pub fn per_100g(&self, base_quantity: f64) -> Self {
        let ratio = 100.0 / base_quantity;
        Self {
            calories: self.calories * ratio,
            proteins: self.proteins * ratio,
            carbs: self.carbs * ratio,
            fats: self.fats * ratio,
            saturated_fats: self.saturated_fats.map(|v| v * ratio),
            trans_fats: self.trans_fats.map(|v| v * ratio),
            fiber: self.fiber.map(|v| v * ratio),
            sodium: self.sodium.map(|v| v * ratio),
            sugar: self.sugar.map(|v| v * ratio),
        }
    }

    /// Name of the first negative (or non-finite) field, if any.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let fields = [
            ("calories", Some(self.calories)),
            ("proteins", Some(self.proteins)),
            ("carbs", Some(self.carbs)),
            ("fats", Some(self.fats)),
            ("saturated_fats", self.saturated_fats),
            ("trans_fats", self.trans_fats),
            ("fiber", self.fiber),
            ("sodium", self.sodium),
            ("sugar", self.sugar),
        ];
        fields
            .into_iter()
            .find(|(_, value)| value.is_some_and(|v| !v.is_finite() || v < 0.0))
            .map(|(name, _)| name)
    }
}

/// Absolute nutrient quantities for a resolved mass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionResult {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub weight_grams: f64,
    pub saturated_fats: f64,
    pub trans_fats: f64,
    pub fiber: f64,
    pub sodium: f64,
    pub sugar: f64,
}

impl NutritionResult {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Multiply every field, weight included.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            proteins: self.proteins * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
            weight_grams: self.weight_grams * factor,
            saturated_fats: self.saturated_fats * factor,
            trans_fats: self.trans_fats * factor,
            fiber: self.fiber * factor,
            sodium: self.sodium * factor,
            sugar: self.sugar * factor,
        }
    }

    /// Same composition, rescaled so the result weighs exactly `grams`.
    ///
    /// A result without mass carries no ratio to rescale, so it yields zero.
    pub fn rescaled_to(&self, grams: f64) -> Self {
        if self.weight_grams <= 0.0 {
            return Self::zero();
        }
        Self {
            weight_grams: grams,
            ..self.scaled(grams / self.weight_grams)
        }
    }
}

impl Add for NutritionResult {
    type Output = NutritionResult;

    fn add(self, other: NutritionResult) -> NutritionResult {
        NutritionResult {
            calories: self.calories + other.calories,
            proteins: self.proteins + other.proteins,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
            weight_grams: self.weight_grams + other.weight_grams,
            saturated_fats: self.saturated_fats + other.saturated_fats,
            trans_fats: self.trans_fats + other.trans_fats,
            fiber: self.fiber + other.fiber,
            sodium: self.sodium + other.sodium,
            sugar: self.sugar + other.sugar,
        }
    }
}

impl AddAssign for NutritionResult {
    fn add_assign(&mut self, other: NutritionResult) {
        *self = *self + other;
    }
}

impl Sum for NutritionResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionResult::zero(), |acc, n| acc + n)
    }
}

/// Absolute nutrition of `grams` of a food with the given per-100g profile.
pub fn scale(profile: &NutrientProfile, grams: f64) -> NutritionResult {
    let ratio = grams / 100.0;
    NutritionResult {
        calories: profile.calories * ratio,
        proteins: profile.proteins * ratio,
        carbs: profile.carbs * ratio,
        fats: profile.fats * ratio,
        weight_grams: grams,
        saturated_fats: profile.saturated_fats.unwrap_or(0.0) * ratio,
        trans_fats: profile.trans_fats.unwrap_or(0.0) * ratio,
        fiber: profile.fiber.unwrap_or(0.0) * ratio,
        sodium: profile.sodium.unwrap_or(0.0) * ratio,
        sugar: profile.sugar.unwrap_or(0.0) * ratio,
    }
}

#[cfg(test)]
pub(crate) mod profile_tests {
    use super::*;

    pub(crate) const TOLERANCE: f64 = 1e-9;

    pub(crate) fn assert_close(actual: &NutritionResult, expected: &NutritionResult) {
        let pairs = [
            ("calories", actual.calories, expected.calories),
            ("proteins", actual.proteins, expected.proteins),
            ("carbs", actual.carbs, expected.carbs),
            ("fats", actual.fats, expected.fats),
            ("weight_grams", actual.weight_grams, expected.weight_grams),
            ("saturated_fats", actual.saturated_fats, expected.saturated_fats),
            ("trans_fats", actual.trans_fats, expected.trans_fats),
            ("fiber", actual.fiber, expected.fiber),
            ("sodium", actual.sodium, expected.sodium),
            ("sugar", actual.sugar, expected.sugar),
        ];
        for (name, a, e) in pairs {
            assert!((a - e).abs() < 1e-6, "{name}: got {a}, expected {e}");
        }
    }

    fn cheese() -> NutrientProfile {
        NutrientProfile {
            calories: 350.0,
            proteins: 25.0,
            carbs: 2.0,
            fats: 27.0,
            saturated_fats: Some(17.0),
            trans_fats: None,
            fiber: None,
            sodium: Some(600.0),
            sugar: Some(0.5),
        }
    }

    #[test]
    fn scale_multiplies_by_grams_over_hundred() {
        let n = scale(&cheese(), 30.0);
        assert!((n.calories - 105.0).abs() < TOLERANCE);
        assert!((n.proteins - 7.5).abs() < TOLERANCE);
        assert!((n.sodium - 180.0).abs() < TOLERANCE);
        assert_eq!(n.weight_grams, 30.0);
    }

    #[test]
    fn missing_optional_nutrients_scale_to_zero() {
        let n = scale(&cheese(), 250.0);
        assert_eq!(n.trans_fats, 0.0);
        assert_eq!(n.fiber, 0.0);
    }

    #[test]
    fn scale_is_linear_in_grams() {
        for grams in [0.0, 1.0, 12.5, 100.0, 733.3] {
            let single = scale(&cheese(), grams);
            let double = scale(&cheese(), 2.0 * grams);
            assert_close(&double, &single.scaled(2.0));
        }
    }

    #[test]
    fn per_100g_normalizes_from_base_quantity() {
        let per_slice = NutrientProfile {
            calories: 75.0,
            proteins: 3.0,
            carbs: 12.0,
            fats: 1.0,
            fiber: Some(1.5),
            ..Default::default()
        };
        let normalized = per_slice.per_100g(25.0);
        assert!((normalized.calories - 300.0).abs() < TOLERANCE);
        assert!((normalized.carbs - 48.0).abs() < TOLERANCE);
        assert_eq!(normalized.fiber, Some(6.0));
        assert_eq!(normalized.sugar, None);
    }

    #[test]
    fn invalid_field_reports_negative_values() {
        assert_eq!(cheese().invalid_field(), None);
        let bad = NutrientProfile {
            sugar: Some(-1.0),
            ..cheese()
        };
        assert_eq!(bad.invalid_field(), Some("sugar"));
        let nan = NutrientProfile {
            calories: f64::NAN,
            ..cheese()
        };
        assert_eq!(nan.invalid_field(), Some("calories"));
    }

    #[test]
    fn rescaled_to_keeps_ratios_and_sets_weight() {
        let base = scale(&cheese(), 200.0);
        let half = base.rescaled_to(100.0);
        assert_close(&half, &scale(&cheese(), 100.0));
        assert_eq!(NutritionResult::zero().rescaled_to(50.0), NutritionResult::zero());
    }

    #[test]
    fn sum_adds_field_by_field() {
        let parts = vec![scale(&cheese(), 10.0), scale(&cheese(), 30.0)];
        let total: NutritionResult = parts.into_iter().sum();
        assert_close(&total, &scale(&cheese(), 40.0));
    }
}
