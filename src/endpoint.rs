//! Request descriptions for the Edamam API.
//!
//! An [`Endpoint`] says where a request goes, what it carries and how the
//! decoded response is turned into the value callers work with. The
//! [`EdamamClient`](crate::EdamamClient) executes any endpoint the same way,
//! so the search and nutrition flows share one request/response path.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{
    NutritionAnalysis, RecipeSubmission, RecipeSummary, SearchQuery, SearchResponse,
};
use crate::FinderError;

pub trait Endpoint {
    /// Wire shape of a successful response
    type Response: DeserializeOwned;
    /// Value handed back to the caller
    type Output;

    fn method(&self) -> Method;

    /// Path relative to the client's base URL
    fn path(&self) -> &str;

    /// Query parameters other than credentials
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// JSON request body, if any
    fn body(&self) -> Result<Option<Value>, FinderError> {
        Ok(None)
    }

    fn project(response: Self::Response) -> Self::Output;
}

/// `GET /search` with a free-text query and optional diet filter
#[derive(Debug, Clone)]
pub struct RecipeSearchEndpoint {
    pub query: SearchQuery,
}

impl RecipeSearchEndpoint {
    pub fn new(query: SearchQuery) -> Self {
        Self { query }
    }
}

impl Endpoint for RecipeSearchEndpoint {
    type Response = SearchResponse;
    type Output = Vec<RecipeSummary>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> &str {
        "/search"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.query.query.clone())];
        if let Some(diet) = self.query.diet {
            params.push(("diet", diet.as_str().to_string()));
        }
        params
    }

    fn project(response: SearchResponse) -> Vec<RecipeSummary> {
        response.hits.into_iter().map(|hit| hit.recipe).collect()
    }
}

/// `POST /api/nutrition-details` with a title and ingredient lines
#[derive(Debug, Clone)]
pub struct NutritionDetailsEndpoint {
    pub submission: RecipeSubmission,
}

impl NutritionDetailsEndpoint {
    pub fn new(submission: RecipeSubmission) -> Self {
        Self { submission }
    }
}

impl Endpoint for NutritionDetailsEndpoint {
    type Response = NutritionAnalysis;
    type Output = NutritionAnalysis;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> &str {
        "/api/nutrition-details"
    }

    fn body(&self) -> Result<Option<Value>, FinderError> {
        Ok(Some(serde_json::to_value(&self.submission)?))
    }

    fn project(response: NutritionAnalysis) -> NutritionAnalysis {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Diet;

    #[test]
    fn test_search_query_params_without_diet() {
        let endpoint = RecipeSearchEndpoint::new(SearchQuery::new("chicken"));
        assert_eq!(endpoint.query(), vec![("q", "chicken".to_string())]);
        assert_eq!(endpoint.method(), Method::GET);
        assert!(endpoint.body().unwrap().is_none());
    }

    #[test]
    fn test_search_query_params_with_diet() {
        let endpoint =
            RecipeSearchEndpoint::new(SearchQuery::new("pasta").with_diet(Diet::LowFat));
        assert_eq!(
            endpoint.query(),
            vec![("q", "pasta".to_string()), ("diet", "low-fat".to_string())]
        );
    }

    #[test]
    fn test_search_projection_keeps_hit_order() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"hits": [
                {"recipe": {"label": "A", "image": "ia", "url": "ua", "dietLabels": ["Low-Carb"], "healthLabels": []}},
                {"recipe": {"label": "B", "image": "ib", "url": "ub", "dietLabels": [], "healthLabels": ["Vegan"]}}
            ]}"#,
        )
        .unwrap();

        let recipes = RecipeSearchEndpoint::project(response);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].label, "A");
        assert_eq!(recipes[0].diet_labels, vec!["Low-Carb"]);
        assert_eq!(recipes[1].health_labels, vec!["Vegan"]);
    }

    #[test]
    fn test_nutrition_body_has_no_credentials() {
        let endpoint = NutritionDetailsEndpoint::new(RecipeSubmission::from_text(
            "Omelette",
            "3 eggs\n",
        ));
        let body = endpoint.body().unwrap().unwrap();
        assert_eq!(body["title"], "Omelette");
        assert_eq!(body["ingr"], serde_json::json!(["3 eggs"]));
        assert!(body.get("app_id").is_none());
        assert!(body.get("app_key").is_none());
        assert!(endpoint.query().is_empty());
    }
}
