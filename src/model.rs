use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FinderError;

/// Diet filter accepted by the recipe search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    Balanced,
    HighFiber,
    HighProtein,
    LowCarb,
    LowFat,
    LowSodium,
}

impl Diet {
    pub const ALL: [Diet; 6] = [
        Diet::Balanced,
        Diet::HighFiber,
        Diet::HighProtein,
        Diet::LowCarb,
        Diet::LowFat,
        Diet::LowSodium,
    ];

    /// Value sent in the `diet` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Diet::Balanced => "balanced",
            Diet::HighFiber => "high-fiber",
            Diet::HighProtein => "high-protein",
            Diet::LowCarb => "low-carb",
            Diet::LowFat => "low-fat",
            Diet::LowSodium => "low-sodium",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Diet {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Diet::ALL
            .into_iter()
            .find(|diet| diet.as_str() == wanted)
            .ok_or_else(|| {
                FinderError::InvalidInput(format!(
                    "unknown diet '{}', expected one of: {}",
                    s,
                    Diet::ALL.map(|d| d.as_str()).join(", ")
                ))
            })
    }
}

/// Input of the recipe search flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Free text; may be empty
    pub query: String,
    pub diet: Option<Diet>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            diet: None,
        }
    }

    pub fn with_diet(mut self, diet: Diet) -> Self {
        self.diet = Some(diet);
        self
    }
}

/// One recipe as returned inside a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub label: String,
    pub image: String,
    pub url: String,
    #[serde(rename = "dietLabels", default)]
    pub diet_labels: Vec<String>,
    #[serde(rename = "healthLabels", default)]
    pub health_labels: Vec<String>,
}

/// Wrapper object around each search result
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub recipe: RecipeSummary,
}

/// Body of a recipe search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Recipe sent for nutrition analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSubmission {
    pub title: String,
    pub ingr: Vec<String>,
}

impl RecipeSubmission {
    /// Build a submission from a title and the raw ingredient text box content
    pub fn from_text(title: impl Into<String>, ingredients: &str) -> Self {
        Self {
            title: title.into(),
            ingr: parse_ingredient_lines(ingredients),
        }
    }
}

/// Split ingredient text into lines, dropping lines that are blank after trimming.
///
/// Kept lines are returned as written, in their original order.
pub fn parse_ingredient_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}

/// One entry of the nutrient breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub label: String,
    pub quantity: f64,
    pub unit: String,
}

/// Nutrient code → nutrient, in the order the response listed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientTable(Vec<(String, Nutrient)>);

impl NutrientTable {
    pub fn new(entries: Vec<(String, Nutrient)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Nutrient> {
        self.0.iter().find(|(k, _)| k == code).map(|(_, n)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Nutrient)> {
        self.0.iter().map(|(k, n)| (k.as_str(), n))
    }
}

impl<'de> Deserialize<'de> for NutrientTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = NutrientTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of nutrient code to nutrient")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((code, nutrient)) = map.next_entry::<String, Nutrient>()? {
                    // Later duplicates replace earlier ones but keep the first position
                    match entries.iter_mut().find(|(k, _)| *k == code) {
                        Some(entry) => entry.1 = nutrient,
                        None => entries.push((code, nutrient)),
                    }
                }
                Ok(NutrientTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl Serialize for NutrientTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, nutrient) in &self.0 {
            map.serialize_entry(code, nutrient)?;
        }
        map.end()
    }
}

/// Body of a nutrition-details response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    #[serde(default)]
    pub uri: String,
    pub calories: f64,
    #[serde(rename = "totalWeight")]
    pub total_weight: f64,
    #[serde(rename = "dietLabels", default)]
    pub diet_labels: Vec<String>,
    #[serde(rename = "healthLabels", default)]
    pub health_labels: Vec<String>,
    #[serde(default)]
    pub cautions: Vec<String>,
    #[serde(rename = "totalNutrients", default)]
    pub total_nutrients: NutrientTable,
}
