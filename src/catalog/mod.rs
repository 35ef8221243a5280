pub mod data_loader;
pub mod records;
pub mod remote;

pub use data_loader::{load_recipe_corpus_csv, load_recipe_corpus_json};
pub use records::{Ingredient, NutrientProfile, RecipeNutrition, RecipeRecord};
pub use remote::{CatalogEndpoint, CatalogFetchError};
