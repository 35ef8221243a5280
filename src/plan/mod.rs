pub mod planner;
pub mod ranker;
pub mod scaler;
pub mod targets;

// Re-export the pipeline entry points so call sites stay thin adapters.
pub use planner::{build_daily_plan, DailyPlan, SlotSuggestions};
pub use ranker::{macro_percentages, rank_candidates, similarity_score, MacroPercentages};
pub use scaler::{round_for_measuring, scale_candidates, scaled_ingredients, ScaleWindow, ScaledCandidate};
pub use targets::{resolve_meal_slots, resolve_slot_targets, slot_target, MealSlot, MealStructure, SlotTarget};
