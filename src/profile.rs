use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::records::NutrientProfile;
use crate::plan::scaler::ScaleWindow;
use crate::plan::targets::MealStructure;

/// Fallback budget for users whose stored calorie value is absent or zero:
/// 2000 kcal at a 30/40/30 protein/carbs/fat split.
pub const DEFAULT_DAILY_BUDGET: NutrientProfile = NutrientProfile {
    calories: 2000.0,
    protein_g: 150.0,
    carbs_g: 200.0,
    fat_g: 67.0,
};

/// User profile as supplied by the settings layer: daily budget plus meal
/// structure. Weight validation (negative, >1, non-finite) is that layer's
/// responsibility, not enforced here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub daily_budget: Option<NutrientProfile>,
    pub structure: MealStructure,
    #[serde(default)]
    pub scale_window: Option<ScaleWindow>,
}

impl Profile {
    /// The budget to plan against, substituting the default when the stored
    /// value is absent or has no calories.
    pub fn effective_budget(&self) -> NutrientProfile {
        match self.daily_budget {
            Some(budget) if budget.calories > 0.0 => budget,
            _ => DEFAULT_DAILY_BUDGET,
        }
    }

    pub fn effective_scale_window(&self) -> ScaleWindow {
        self.scale_window.unwrap_or_default()
    }
}

/// Loads a profile from JSON. An unrecognized `mode` string in the meal
/// structure surfaces here as a parse error.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file at {:?}", path))?;
    let profile: Profile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profile JSON at {:?}", path))?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_effective_budget_falls_back_on_zero_calories() {
        let profile = Profile {
            daily_budget: Some(NutrientProfile {
                calories: 0.0,
                protein_g: 0.0,
                carbs_g: 0.0,
                fat_g: 0.0,
            }),
            structure: MealStructure::Weighted { slots: vec![] },
            scale_window: None,
        };
        assert_eq!(profile.effective_budget(), DEFAULT_DAILY_BUDGET);

        let profile = Profile {
            daily_budget: None,
            structure: MealStructure::Weighted { slots: vec![] },
            scale_window: None,
        };
        assert_eq!(profile.effective_budget(), DEFAULT_DAILY_BUDGET);
    }

    #[test]
    fn test_load_profile_weighted_mode() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{
                "daily_budget": {{"calories": 1800.0, "protein_g": 140.0, "carbs_g": 170.0, "fat_g": 60.0}},
                "structure": {{"mode": "weighted", "slots": [
                    {{"name": "lunch", "weight": 0.35, "accepted_meal_types": ["lunch", "dinner"]}}
                ]}},
                "scale_window": {{"min": 0.75, "max": 1.5}}
            }}"#
        )?;
        file.flush()?;

        let profile = load_profile(file.path())?;
        assert_eq!(profile.effective_budget().calories, 1800.0);
        assert_eq!(profile.effective_scale_window().min, 0.75);
        match &profile.structure {
            MealStructure::Weighted { slots } => {
                assert_eq!(slots.len(), 1);
                assert_eq!(slots[0].accepted_meal_types[0], "lunch");
            }
            other => panic!("Expected weighted structure, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_load_profile_fasting_mode() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"structure": {{"mode": "fasting", "active_slots": ["iftar", "suhoor"]}}}}"#
        )?;
        file.flush()?;

        let profile = load_profile(file.path())?;
        assert_eq!(profile.effective_budget(), DEFAULT_DAILY_BUDGET);
        assert!(matches!(profile.structure, MealStructure::Fasting { .. }));
        Ok(())
    }

    #[test]
    fn test_load_profile_unknown_mode_is_an_error() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"structure": {{"mode": "intermittent_5_2", "active_slots": []}}}}"#
        )?;
        file.flush()?;

        let result = load_profile(file.path());
        assert!(result.is_err());
        Ok(())
    }
}
