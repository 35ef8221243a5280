use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::catalog::records::{NutrientProfile, RecipeNutrition, RecipeRecord};

// Expected column headers in a corpus CSV export.
const ID_COL: &str = "id";
const NAME_COL: &str = "name";
const MEAL_TYPES_COL: &str = "meal_types";
const CALORIES_COL: &str = "calories";
const PROTEIN_COL: &str = "protein_g";
const CARBS_COL: &str = "carbs_g";
const FAT_COL: &str = "fat_g";

/// Separator between tags inside the meal_types column, e.g. "lunch|dinner".
const MEAL_TYPE_SEPARATOR: char = '|';

fn parse_optional_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok()
}

/// Loads a recipe corpus from a CSV export.
///
/// Rows with an empty name are skipped. A row whose calories column is
/// missing or unparsable gets `RecipeNutrition::Unknown` (the planner will
/// silently exclude it from scaling); unparsable macro columns on a row with
/// valid calories default to 0. An empty corpus is an error.
pub fn load_recipe_corpus_csv(csv_path: &Path) -> Result<Vec<RecipeRecord>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Corpus CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open corpus CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();

    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
    };
    let id_idx = col(ID_COL)?;
    let name_idx = col(NAME_COL)?;
    let meal_types_idx = col(MEAL_TYPES_COL)?;
    let calories_idx = col(CALORIES_COL)?;
    let protein_idx = col(PROTEIN_COL)?;
    let carbs_idx = col(CARBS_COL)?;
    let fat_idx = col(FAT_COL)?;

    let mut corpus = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record
            .get(name_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing name at row {}", row_index))?
            .trim()
            .to_string();
        if name.is_empty() {
            continue;
        }

        let id = record
            .get(id_idx)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("row-{}", row_index));

        let meal_types: Vec<String> = record
            .get(meal_types_idx)
            .map(|s| {
                s.split(MEAL_TYPE_SEPARATOR)
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let nutrition = match record.get(calories_idx).and_then(parse_optional_f32) {
            Some(calories) => RecipeNutrition::PerServing(NutrientProfile {
                calories,
                protein_g: record.get(protein_idx).and_then(parse_optional_f32).unwrap_or(0.0),
                carbs_g: record.get(carbs_idx).and_then(parse_optional_f32).unwrap_or(0.0),
                fat_g: record.get(fat_idx).and_then(parse_optional_f32).unwrap_or(0.0),
            }),
            None => RecipeNutrition::Unknown,
        };

        corpus.push(RecipeRecord {
            id,
            name,
            meal_types,
            nutrition_per_serving: nutrition,
            ingredients: vec![],
            instructions: vec![],
        });
    }

    if corpus.is_empty() {
        return Err(anyhow::anyhow!("No valid recipes loaded from {:?}", csv_path));
    }

    Ok(corpus)
}

/// Loads a recipe corpus from a JSON array of `RecipeRecord`, the same shape
/// the remote catalog endpoint serves.
pub fn load_recipe_corpus_json(json_path: &Path) -> Result<Vec<RecipeRecord>> {
    let content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read corpus JSON file at {:?}", json_path))?;
    let corpus: Vec<RecipeRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus JSON at {:?}", json_path))?;
    if corpus.is_empty() {
        return Err(anyhow::anyhow!("No recipes found in {:?}", json_path));
    }
    Ok(corpus)
}
