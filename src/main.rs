use anyhow::{Context, Result};
use std::path::Path;

use meal_matcher::catalog::data_loader::{load_recipe_corpus_csv, load_recipe_corpus_json};
use meal_matcher::catalog::records::RecipeRecord;
use meal_matcher::catalog::remote::CatalogEndpoint;
use meal_matcher::cli::parse_args;
use meal_matcher::plan::planner::build_daily_plan;
use meal_matcher::plan::scaler::scaled_ingredients;
use meal_matcher::profile::load_profile;

const CATALOG_BASE_URL_ENV_VAR: &str = "CATALOG_BASE_URL";

async fn load_corpus(corpus_file: Option<&str>, remote: bool) -> Result<Vec<RecipeRecord>> {
    if remote {
        println!("Fetching recipe corpus from remote catalog...");
        let endpoint = CatalogEndpoint::from_env(CATALOG_BASE_URL_ENV_VAR);
        let corpus = endpoint
            .fetch_recipe_corpus()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch recipe corpus: {}", e))?;
        println!(" > Fetched {} recipes.", corpus.len());
        return Ok(corpus);
    }

    let path_str = corpus_file
        .ok_or_else(|| anyhow::anyhow!("Either --corpus-file or --remote is required"))?;
    let path = Path::new(path_str);
    println!("Loading recipe corpus from {:?}...", path);
    let corpus = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_recipe_corpus_json(path),
        _ => load_recipe_corpus_csv(path),
    }
    .with_context(|| format!("Failed to load recipe corpus from '{}'", path_str))?;
    println!(" > Corpus loaded: {} recipes.", corpus.len());
    Ok(corpus)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli_args = parse_args();

    let corpus = load_corpus(cli_args.corpus_file.as_deref(), cli_args.remote).await?;

    println!("Loading profile from {}...", cli_args.profile_file);
    let profile = load_profile(Path::new(&cli_args.profile_file))
        .with_context(|| format!("Failed to load profile '{}'", cli_args.profile_file))?;

    let budget = profile.effective_budget();
    let window = profile.effective_scale_window();
    println!(
        " > Daily budget: {} kcal ({}g P / {}g C / {}g F), scale window [{}, {}]",
        budget.calories, budget.protein_g, budget.carbs_g, budget.fat_g, window.min, window.max
    );

    let plan = build_daily_plan(&corpus, &budget, &profile.structure, &window);

    for slot in &plan.slots {
        println!(
            "\n=== {} — target {} kcal ({}g P / {}g C / {}g F) ===",
            slot.slot_name,
            slot.target.calories,
            slot.target.protein_g,
            slot.target.carbs_g,
            slot.target.fat_g
        );

        if slot.candidates.is_empty() {
            println!("  (no suitable recipe in the corpus for this slot)");
            continue;
        }

        for (rank, candidate) in slot.candidates.iter().take(cli_args.top).enumerate() {
            println!(
                "  {}. {} — {:.2}x servings, {} kcal, macro match {}",
                rank + 1,
                candidate.recipe.name,
                candidate.scale_factor,
                candidate.scaled_calories,
                candidate.macro_similarity_score.unwrap_or(0)
            );
        }

        if cli_args.ingredients {
            let top = &slot.candidates[0];
            if top.recipe.ingredients.is_empty() {
                println!("  (top suggestion has no ingredient detail)");
            } else {
                println!("  Scaled ingredients for '{}':", top.recipe.name);
                for ingredient in scaled_ingredients(top.recipe, top.scale_factor) {
                    match (ingredient.quantity, ingredient.unit.as_deref()) {
                        (Some(quantity), Some(unit)) => {
                            println!("    - {} {} {}", quantity, unit, ingredient.name)
                        }
                        (Some(quantity), None) => println!("    - {} {}", quantity, ingredient.name),
                        _ => println!("    - {}", ingredient.name),
                    }
                }
            }
        }
    }

    Ok(())
}
