use serde::{Deserialize, Serialize};

/// Calories plus the three tracked macros, in absolute units.
/// Used both for a recipe's per-serving nutrition and for a daily budget.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct NutrientProfile {
    pub calories: f32,
    pub protein_g: f32,
    pub carbs_g: f32,
    pub fat_g: f32,
}

/// Nutrition data for a recipe is either present per serving or absent.
/// Absent data is a checked variant, not an implicit zero; recipes without
/// usable nutrition are silently excluded from scaling, never arithmetic'd on.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(from = "Option<NutrientProfile>", into = "Option<NutrientProfile>")]
pub enum RecipeNutrition {
    PerServing(NutrientProfile),
    #[default]
    Unknown,
}

impl RecipeNutrition {
    pub fn per_serving(&self) -> Option<&NutrientProfile> {
        match self {
            RecipeNutrition::PerServing(profile) => Some(profile),
            RecipeNutrition::Unknown => None,
        }
    }

    /// The base-calorie figure scaling divides by. `None` unless nutrition is
    /// present with strictly positive calories.
    pub fn scaling_basis(&self) -> Option<&NutrientProfile> {
        self.per_serving().filter(|p| p.calories > 0.0)
    }
}

impl From<Option<NutrientProfile>> for RecipeNutrition {
    fn from(value: Option<NutrientProfile>) -> Self {
        match value {
            Some(profile) => RecipeNutrition::PerServing(profile),
            None => RecipeNutrition::Unknown,
        }
    }
}

impl From<RecipeNutrition> for Option<NutrientProfile> {
    fn from(value: RecipeNutrition) -> Self {
        match value {
            RecipeNutrition::PerServing(profile) => Some(profile),
            RecipeNutrition::Unknown => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<f32>,
    pub unit: Option<String>,
}

/// A recipe from the external catalog. Read-only within this crate; the
/// catalog collaborator owns creation and visibility filtering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    /// Category tags such as "breakfast", "lunch", "snack", "iftar".
    #[serde(default)]
    pub meal_types: Vec<String>,
    #[serde(default)]
    pub nutrition_per_serving: RecipeNutrition,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeRecord {
    /// Case-insensitive check against a list of accepted tags.
    pub fn matches_any_meal_type(&self, accepted: &[String]) -> bool {
        self.meal_types
            .iter()
            .any(|tag| accepted.iter().any(|a| a.eq_ignore_ascii_case(tag)))
    }

    pub fn has_meal_type(&self, tag: &str) -> bool {
        self.meal_types.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_tags(tags: &[&str]) -> RecipeRecord {
        RecipeRecord {
            id: "r1".to_string(),
            name: "Test recipe".to_string(),
            meal_types: tags.iter().map(|t| t.to_string()).collect(),
            nutrition_per_serving: RecipeNutrition::Unknown,
            ingredients: vec![],
            instructions: vec![],
        }
    }

    #[test]
    fn test_meal_type_match_is_case_insensitive() {
        let record = record_with_tags(&["Breakfast", "snack"]);
        assert!(record.matches_any_meal_type(&["breakfast".to_string()]));
        assert!(record.matches_any_meal_type(&["SNACK".to_string()]));
        assert!(!record.matches_any_meal_type(&["lunch".to_string()]));
    }

    #[test]
    fn test_scaling_basis_requires_positive_calories() {
        let zero_cal = RecipeNutrition::PerServing(NutrientProfile {
            calories: 0.0,
            protein_g: 10.0,
            carbs_g: 10.0,
            fat_g: 10.0,
        });
        assert!(zero_cal.scaling_basis().is_none());

        let ok = RecipeNutrition::PerServing(NutrientProfile {
            calories: 350.0,
            protein_g: 30.0,
            carbs_g: 40.0,
            fat_g: 8.0,
        });
        assert_eq!(ok.scaling_basis().map(|p| p.calories), Some(350.0));

        assert!(RecipeNutrition::Unknown.scaling_basis().is_none());
    }

    #[test]
    fn test_missing_nutrition_deserializes_to_unknown() {
        let json = r#"{"id":"r2","name":"No data","meal_types":["lunch"]}"#;
        let record: RecipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.nutrition_per_serving, RecipeNutrition::Unknown);

        let json = r#"{"id":"r3","name":"With data","meal_types":["lunch"],
            "nutrition_per_serving":{"calories":500.0,"protein_g":40.0,"carbs_g":45.0,"fat_g":15.0}}"#;
        let record: RecipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.nutrition_per_serving.per_serving().map(|p| p.calories),
            Some(500.0)
        );
    }
}
