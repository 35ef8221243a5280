use serde::{Deserialize, Serialize};

use crate::catalog::records::NutrientProfile;

/// One named share of the daily budget. The first entry of
/// `accepted_meal_types` is the slot's primary tag, used as a ranking
/// tie-break downstream.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealSlot {
    pub name: String,
    /// Fraction of the daily budget, 0..1. Not validated here; the
    /// profile/settings layer upstream owns validation.
    pub weight: f32,
    pub accepted_meal_types: Vec<String>,
}

/// Per-slot calorie and macro targets, each rounded to the nearest whole
/// number independently. Independent rounding means slot targets can sum to
/// slightly more or less than the daily budget; that is accepted behavior.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlotTarget {
    pub slot_name: String,
    pub calories: f32,
    pub protein_g: f32,
    pub carbs_g: f32,
    pub fat_g: f32,
}

/// How the day is divided into slots: either a user-customized weighted list,
/// or the fixed-order fasting set where the user opts into a subset of the
/// canonical slots. An unrecognized `mode` string fails deserialization,
/// which is the one configuration error this crate raises.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MealStructure {
    Weighted { slots: Vec<MealSlot> },
    Fasting { active_slots: Vec<String> },
}

/// Canonical fasting-day slots: name, share of the daily budget, accepted
/// meal-type tags (slot's own name first, as the primary tag).
const FASTING_SLOT_TABLE: &[(&str, f32, &[&str])] = &[
    ("iftar", 0.40, &["iftar", "dinner"]),
    ("snack", 0.15, &["snack"]),
    ("dinner", 0.20, &["dinner", "lunch"]),
    ("suhoor", 0.25, &["suhoor", "breakfast"]),
];

/// Fallback share for an active fasting slot not present in the table;
/// applied before normalization.
const FASTING_DEFAULT_WEIGHT: f32 = 0.2;

fn fasting_table_entry(name: &str) -> Option<&'static (&'static str, f32, &'static [&'static str])> {
    FASTING_SLOT_TABLE
        .iter()
        .find(|(slot_name, _, _)| slot_name.eq_ignore_ascii_case(name))
}

/// Expands a meal structure into concrete weighted slots.
///
/// Weighted mode passes the user's slots through unchanged, in the supplied
/// order. Fasting mode walks the canonical table order, keeps the slots the
/// user opted into, appends any active names missing from the table (at the
/// default weight, own name as only tag), and re-normalizes the included
/// weights to sum to 1 so a subset still consumes the full daily budget.
pub fn resolve_meal_slots(structure: &MealStructure) -> Vec<MealSlot> {
    match structure {
        MealStructure::Weighted { slots } => slots.clone(),
        MealStructure::Fasting { active_slots } => {
            let mut resolved: Vec<MealSlot> = Vec::with_capacity(active_slots.len());

            for (name, weight, tags) in FASTING_SLOT_TABLE {
                if active_slots.iter().any(|a| a.eq_ignore_ascii_case(name)) {
                    resolved.push(MealSlot {
                        name: (*name).to_string(),
                        weight: *weight,
                        accepted_meal_types: tags.iter().map(|t| t.to_string()).collect(),
                    });
                }
            }
            for name in active_slots {
                if fasting_table_entry(name).is_none() {
                    resolved.push(MealSlot {
                        name: name.clone(),
                        weight: FASTING_DEFAULT_WEIGHT,
                        accepted_meal_types: vec![name.clone()],
                    });
                }
            }

            let total_weight: f32 = resolved.iter().map(|s| s.weight).sum();
            if total_weight > 0.0 {
                for slot in resolved.iter_mut() {
                    slot.weight /= total_weight;
                }
            }
            resolved
        }
    }
}

/// Target for one slot: `round(daily_value * weight)` per nutrient, each
/// rounded independently. Malformed weights (negative, >1, non-finite) pass
/// through unvalidated by design.
pub fn slot_target(budget: &NutrientProfile, slot: &MealSlot) -> SlotTarget {
    SlotTarget {
        slot_name: slot.name.clone(),
        calories: (budget.calories * slot.weight).round(),
        protein_g: (budget.protein_g * slot.weight).round(),
        carbs_g: (budget.carbs_g * slot.weight).round(),
        fat_g: (budget.fat_g * slot.weight).round(),
    }
}

/// Resolves a daily budget plus a meal structure into per-slot targets,
/// one `SlotTarget` per resolved slot, in resolved-slot order.
pub fn resolve_slot_targets(budget: &NutrientProfile, structure: &MealStructure) -> Vec<SlotTarget> {
    resolve_meal_slots(structure)
        .iter()
        .map(|slot| slot_target(budget, slot))
        .collect()
}
