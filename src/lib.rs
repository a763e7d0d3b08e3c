pub mod builder;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod flow;
pub mod model;
pub mod view;

pub use builder::EdamamClientBuilder;
pub use client::{Credentials, EdamamClient};
pub use config::{EdamamConfig, FinderConfig};
pub use endpoint::{Endpoint, NutritionDetailsEndpoint, RecipeSearchEndpoint};
pub use error::FinderError;
pub use flow::{ErrorPolicy, Flow, NutritionAnalyzer, RecipeSearch};
pub use model::{
    parse_ingredient_lines, Diet, Nutrient, NutrientTable, NutritionAnalysis, RecipeSubmission,
    RecipeSummary, SearchQuery,
};
pub use view::{NutrientLine, NutritionView, RecipeCard, NUTRIENT_DISPLAY_LIMIT};

/// Client built from `config.toml`, `RECIPE_FINDER__*` and `EDAMAM_APP_*` settings
pub fn client_from_env() -> Result<EdamamClient, FinderError> {
    let config = FinderConfig::load()?;
    EdamamClient::from_config(&config.edamam)
}

/// Search recipes using configuration from the environment
///
/// # Example
/// ```no_run
/// # use recipe_finder::{search_recipes, Diet};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = search_recipes("chicken", Some(Diet::HighProtein)).await?;
/// for recipe in recipes {
///     println!("{}", recipe.label);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    query: &str,
    diet: Option<Diet>,
) -> Result<Vec<RecipeSummary>, FinderError> {
    let client = client_from_env()?;
    let query = SearchQuery {
        query: query.to_string(),
        diet,
    };
    client.search_recipes(&query).await
}

/// Analyze a recipe using configuration from the environment
///
/// `ingredients` is the raw text, one ingredient per line; blank lines are skipped.
pub async fn analyze_recipe(
    title: &str,
    ingredients: &str,
) -> Result<NutritionAnalysis, FinderError> {
    let client = client_from_env()?;
    client
        .analyze_nutrition(&RecipeSubmission::from_text(title, ingredients))
        .await
}
