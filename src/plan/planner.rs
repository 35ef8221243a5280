use crate::catalog::records::{NutrientProfile, RecipeRecord};
use crate::plan::ranker::{macro_percentages, rank_candidates};
use crate::plan::scaler::{scale_candidates, ScaleWindow, ScaledCandidate};
use crate::plan::targets::{resolve_meal_slots, slot_target, MealStructure, SlotTarget};

/// Ranked suggestions for a single slot. An empty candidate list is a valid
/// "no suitable recipe" state the caller must handle, not an error.
#[derive(Debug, Clone)]
pub struct SlotSuggestions<'a> {
    pub slot_name: String,
    pub target: SlotTarget,
    /// Ranked best-first; index 0 is the default suggestion, the rest are
    /// swap alternatives.
    pub candidates: Vec<ScaledCandidate<'a>>,
}

#[derive(Debug, Clone)]
pub struct DailyPlan<'a> {
    pub slots: Vec<SlotSuggestions<'a>>,
}

/// Runs the full pipeline for one day: resolve slot targets from the budget
/// and meal structure, filter and scale the corpus per slot, then rank each
/// slot's candidates by macro similarity.
///
/// Pure and synchronous; operates on the caller's corpus snapshot and holds
/// no state between invocations, so repeated calls with identical inputs
/// produce identical plans.
pub fn build_daily_plan<'a>(
    corpus: &'a [RecipeRecord],
    budget: &NutrientProfile,
    structure: &MealStructure,
    window: &ScaleWindow,
) -> DailyPlan<'a> {
    // Target macro split comes from the daily budget's grams; slot targets
    // are uniform fractions of it, so one split serves every slot.
    let target_split = macro_percentages(budget);

    let slots = resolve_meal_slots(structure)
        .into_iter()
        .map(|slot| {
            let target = slot_target(budget, &slot);
            let mut candidates =
                scale_candidates(corpus, &target, &slot.accepted_meal_types, window);
            rank_candidates(
                &mut candidates,
                &target_split,
                slot.accepted_meal_types.first().map(String::as_str),
            );
            SlotSuggestions {
                slot_name: slot.name,
                target,
                candidates,
            }
        })
        .collect();

    DailyPlan { slots }
}
