use std::cmp::{Ordering, Reverse};

use crate::catalog::records::NutrientProfile;
use crate::plan::scaler::ScaledCandidate;

/// Macro composition as whole percent-of-calories figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroPercentages {
    pub protein_pct: f32,
    pub carbs_pct: f32,
    pub fat_pct: f32,
}

/// Atwater factors, kcal per gram.
const PROTEIN_KCAL_PER_G: f32 = 4.0;
const CARBS_KCAL_PER_G: f32 = 4.0;
const FAT_KCAL_PER_G: f32 = 9.0;

/// Score weighting: protein fidelity matters most for satiety and
/// muscle-preservation goals, so it carries half the score.
const PROTEIN_SCORE_WEIGHT: f32 = 0.5;
const CARBS_SCORE_WEIGHT: f32 = 0.3;
const FAT_SCORE_WEIGHT: f32 = 0.2;

/// Linear penalty per percentage point of difference; a sub-score bottoms
/// out at 0 once the difference reaches ~67 points.
const DIFF_PENALTY_MULTIPLIER: f32 = 1.5;

/// Two candidates whose scores differ by at most this much are treated as
/// tied, so noise-level score differences never flip the ordering.
pub const SCORE_TIE_BAND: i32 = 5;

/// Converts absolute grams to percent-of-calories, rounded to whole percents.
///
/// Always computed from the *base* unscaled profile: scaling multiplies
/// calories and macros uniformly, so percentage composition is
/// scale-invariant. Absolute grams shown elsewhere are scaled; this
/// asymmetry is intentional.
pub fn macro_percentages(profile: &NutrientProfile) -> MacroPercentages {
    if profile.calories <= 0.0 {
        return MacroPercentages {
            protein_pct: 0.0,
            carbs_pct: 0.0,
            fat_pct: 0.0,
        };
    }
    MacroPercentages {
        protein_pct: (profile.protein_g * PROTEIN_KCAL_PER_G / profile.calories * 100.0).round(),
        carbs_pct: (profile.carbs_g * CARBS_KCAL_PER_G / profile.calories * 100.0).round(),
        fat_pct: (profile.fat_g * FAT_KCAL_PER_G / profile.calories * 100.0).round(),
    }
}

/// 0-100 similarity between a target macro split and a recipe's macro split.
/// Per macro: `max(0, 100 - diff * 1.5)`, then weighted 0.5/0.3/0.2 for
/// protein/carbs/fat and rounded. Pure function; identical inputs always
/// yield the identical score.
pub fn similarity_score(target: &MacroPercentages, recipe: &MacroPercentages) -> i32 {
    let sub_score =
        |target_pct: f32, recipe_pct: f32| (100.0 - (target_pct - recipe_pct).abs() * DIFF_PENALTY_MULTIPLIER).max(0.0);

    let protein_score = sub_score(target.protein_pct, recipe.protein_pct);
    let carbs_score = sub_score(target.carbs_pct, recipe.carbs_pct);
    let fat_score = sub_score(target.fat_pct, recipe.fat_pct);

    (protein_score * PROTEIN_SCORE_WEIGHT
        + carbs_score * CARBS_SCORE_WEIGHT
        + fat_score * FAT_SCORE_WEIGHT)
        .round() as i32
}

/// Scores and orders a slot's candidates in place. Index 0 ends up the
/// default suggestion.
///
/// Ordering: similarity score descending, except that candidates within the
/// tie band of the current band leader are grouped and re-ordered by
/// whether their recipe carries the slot's primary tag, then by scale-factor
/// closeness to 1.0 (less stretching preferred).
pub fn rank_candidates(
    candidates: &mut [ScaledCandidate<'_>],
    target: &MacroPercentages,
    primary_tag: Option<&str>,
) {
    for candidate in candidates.iter_mut() {
        let score = candidate
            .recipe
            .nutrition_per_serving
            .per_serving()
            .map(|profile| similarity_score(target, &macro_percentages(profile)))
            .unwrap_or(0);
        candidate.macro_similarity_score = Some(score);
    }

    candidates.sort_by_key(|c| Reverse(c.score_or_zero()));

    // Greedy tie bands over the score-sorted list: a candidate joins the
    // current band while its score is within SCORE_TIE_BAND of the band
    // leader. Within a band the secondary keys decide.
    let mut band_start = 0;
    while band_start < candidates.len() {
        let leader_score = candidates[band_start].score_or_zero();
        let mut band_end = band_start + 1;
        while band_end < candidates.len()
            && leader_score - candidates[band_end].score_or_zero() <= SCORE_TIE_BAND
        {
            band_end += 1;
        }
        candidates[band_start..band_end].sort_by(|a, b| compare_within_band(a, b, primary_tag));
        band_start = band_end;
    }
}

fn compare_within_band(
    a: &ScaledCandidate<'_>,
    b: &ScaledCandidate<'_>,
    primary_tag: Option<&str>,
) -> Ordering {
    let a_primary = matches_primary(a, primary_tag);
    let b_primary = matches_primary(b, primary_tag);
    match (a_primary, b_primary) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let a_stretch = (a.scale_factor - 1.0).abs();
            let b_stretch = (b.scale_factor - 1.0).abs();
            a_stretch.partial_cmp(&b_stretch).unwrap_or(Ordering::Equal)
        }
    }
}

fn matches_primary(candidate: &ScaledCandidate<'_>, primary_tag: Option<&str>) -> bool {
    primary_tag.map_or(false, |tag| candidate.recipe.has_meal_type(tag))
}
