use serde::{Deserialize, Serialize};

use crate::catalog::records::{Ingredient, RecipeRecord};
use crate::plan::targets::SlotTarget;

/// Allowed range for the serving scale factor. Bounds how much a recipe may
/// be stretched or shrunk to fit a slot, so suggestions never ask for absurd
/// serving sizes like 0.1x or 5x.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ScaleWindow {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleWindow {
    fn default() -> Self {
        ScaleWindow { min: 0.5, max: 2.0 }
    }
}

impl ScaleWindow {
    pub fn contains(&self, scale: f32) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// A recipe matched to a slot, with the serving scale that hits the slot's
/// calorie target. Ephemeral: borrows the corpus, computed fresh per request,
/// never persisted. `macro_similarity_score` stays `None` until the ranker
/// fills it in; comparisons treat `None` as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledCandidate<'a> {
    pub recipe: &'a RecipeRecord,
    pub scale_factor: f32,
    /// Always exactly the slot's target, not `base_calories * scale_factor`,
    /// so the displayed figure never drifts from the budget by rounding.
    pub scaled_calories: f32,
    pub macro_similarity_score: Option<i32>,
}

impl<'a> ScaledCandidate<'a> {
    pub fn score_or_zero(&self) -> i32 {
        self.macro_similarity_score.unwrap_or(0)
    }
}

/// Filters the corpus for one slot and computes scale factors.
///
/// Rejection gates, per recipe: missing or non-positive base calories; no
/// case-insensitive overlap between the recipe's tags and `accepted_tags`;
/// raw scale factor outside `window`. Survivors keep corpus order (the
/// ranker decides final order) with the scale factor rounded to 2 decimals.
/// An empty result is a valid outcome, not an error.
pub fn scale_candidates<'a>(
    corpus: &'a [RecipeRecord],
    target: &SlotTarget,
    accepted_tags: &[String],
    window: &ScaleWindow,
) -> Vec<ScaledCandidate<'a>> {
    let mut candidates = Vec::new();

    for recipe in corpus {
        let base = match recipe.nutrition_per_serving.scaling_basis() {
            Some(profile) => profile,
            None => continue,
        };
        if !recipe.matches_any_meal_type(accepted_tags) {
            continue;
        }

        let raw_scale = target.calories / base.calories;
        if !window.contains(raw_scale) {
            continue;
        }

        candidates.push(ScaledCandidate {
            recipe,
            scale_factor: round_to_hundredths(raw_scale),
            scaled_calories: target.calories,
            macro_similarity_score: None,
        });
    }

    candidates
}

fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Rounds a scaled quantity to something a home cook can measure: values
/// under 10 to the nearest whole number, values of 10 and above to the
/// nearest multiple of 5.
pub fn round_for_measuring(value: f32) -> f32 {
    if value < 10.0 {
        value.round()
    } else {
        (value / 5.0).round() * 5.0
    }
}

/// Applies a scale factor to a recipe's ingredient list, rounding each
/// quantity to a measurable amount. Quantities that were absent stay absent.
pub fn scaled_ingredients(recipe: &RecipeRecord, scale_factor: f32) -> Vec<Ingredient> {
    recipe
        .ingredients
        .iter()
        .map(|ingredient| Ingredient {
            name: ingredient.name.clone(),
            quantity: ingredient
                .quantity
                .map(|q| round_for_measuring(q * scale_factor)),
            unit: ingredient.unit.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::records::{NutrientProfile, RecipeNutrition};

    fn recipe(id: &str, tags: &[&str], calories: f32) -> RecipeRecord {
        RecipeRecord {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            meal_types: tags.iter().map(|t| t.to_string()).collect(),
            nutrition_per_serving: RecipeNutrition::PerServing(NutrientProfile {
                calories,
                protein_g: 30.0,
                carbs_g: 40.0,
                fat_g: 10.0,
            }),
            ingredients: vec![],
            instructions: vec![],
        }
    }

    fn lunch_target(calories: f32) -> SlotTarget {
        SlotTarget {
            slot_name: "lunch".to_string(),
            calories,
            protein_g: 53.0,
            carbs_g: 70.0,
            fat_g: 23.0,
        }
    }

    #[test]
    fn test_scale_factor_within_window_is_accepted() {
        let corpus = vec![recipe("a", &["lunch"], 500.0)];
        let accepted = vec!["lunch".to_string()];
        let candidates =
            scale_candidates(&corpus, &lunch_target(700.0), &accepted, &ScaleWindow::default());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].scale_factor, 1.4);
        assert_eq!(candidates[0].scaled_calories, 700.0);
    }

    #[test]
    fn test_scale_factor_outside_window_is_rejected() {
        // 700 / 200 = 3.5, above the 2.0 ceiling.
        let corpus = vec![recipe("tiny", &["lunch"], 200.0)];
        let accepted = vec!["lunch".to_string()];
        let candidates =
            scale_candidates(&corpus, &lunch_target(700.0), &accepted, &ScaleWindow::default());
        assert!(candidates.is_empty());

        // 700 / 1600 = 0.4375, below the 0.5 floor.
        let corpus = vec![recipe("huge", &["lunch"], 1600.0)];
        let candidates =
            scale_candidates(&corpus, &lunch_target(700.0), &accepted, &ScaleWindow::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_missing_or_zero_calories_is_silently_excluded() {
        let mut no_data = recipe("x", &["lunch"], 500.0);
        no_data.nutrition_per_serving = RecipeNutrition::Unknown;
        let mut zero = recipe("y", &["lunch"], 500.0);
        zero.nutrition_per_serving = RecipeNutrition::PerServing(NutrientProfile {
            calories: 0.0,
            protein_g: 5.0,
            carbs_g: 5.0,
            fat_g: 5.0,
        });
        let ok = recipe("z", &["lunch"], 700.0);

        let corpus = vec![no_data, zero, ok];
        let accepted = vec!["lunch".to_string()];
        let candidates =
            scale_candidates(&corpus, &lunch_target(700.0), &accepted, &ScaleWindow::default());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].recipe.id, "z");
        assert_eq!(candidates[0].scale_factor, 1.0);
    }

    #[test]
    fn test_tag_filter_is_case_insensitive_and_no_match_is_empty_not_error() {
        let corpus = vec![recipe("a", &["Breakfast"], 500.0)];
        let candidates = scale_candidates(
            &corpus,
            &lunch_target(700.0),
            &["BREAKFAST".to_string()],
            &ScaleWindow::default(),
        );
        assert_eq!(candidates.len(), 1);

        let candidates = scale_candidates(
            &corpus,
            &lunch_target(700.0),
            &["lunch".to_string()],
            &ScaleWindow::default(),
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_scale_factor_is_rounded_to_two_decimals() {
        // 700 / 600 = 1.16666... -> 1.17
        let corpus = vec![recipe("a", &["lunch"], 600.0)];
        let candidates = scale_candidates(
            &corpus,
            &lunch_target(700.0),
            &["lunch".to_string()],
            &ScaleWindow::default(),
        );
        assert_eq!(candidates[0].scale_factor, 1.17);
    }

    #[test]
    fn test_round_for_measuring() {
        assert_eq!(round_for_measuring(7.0), 7.0);
        assert_eq!(round_for_measuring(23.0), 25.0);
        assert_eq!(round_for_measuring(9.4), 9.0);
        assert_eq!(round_for_measuring(12.0), 10.0);
    }

    #[test]
    fn test_scaled_ingredients_round_to_measurable_amounts() {
        let mut rec = recipe("a", &["lunch"], 500.0);
        rec.ingredients = vec![
            Ingredient {
                name: "chicken breast".to_string(),
                quantity: Some(150.0),
                unit: Some("g".to_string()),
            },
            Ingredient {
                name: "olive oil".to_string(),
                quantity: Some(5.0),
                unit: Some("ml".to_string()),
            },
            Ingredient {
                name: "salt".to_string(),
                quantity: None,
                unit: None,
            },
        ];

        let scaled = scaled_ingredients(&rec, 1.4);
        // 150 * 1.4 = 210 -> 210 (multiple of 5); 5 * 1.4 = 7 -> 7 (nearest integer).
        assert_eq!(scaled[0].quantity, Some(210.0));
        assert_eq!(scaled[1].quantity, Some(7.0));
        assert_eq!(scaled[2].quantity, None);
    }
}
