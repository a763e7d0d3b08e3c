use std::fmt;

use serde::Serialize;

use crate::model::{NutritionAnalysis, RecipeSummary};

/// Nutrients listed in a [`NutritionView`]
pub const NUTRIENT_DISPLAY_LIMIT: usize = 5;

/// Format `value` with `digits` decimals, rounding halves away from zero
/// (`{:.N}` alone rounds them to even)
fn to_fixed(value: f64, digits: usize) -> String {
    let factor = 10f64.powi(digits as i32);
    format!("{:.*}", digits, (value * factor).round() / factor)
}

/// One search result as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub title: String,
    pub image: String,
    pub link: String,
    pub diet_labels: Vec<String>,
    pub health_labels: Vec<String>,
}

impl From<&RecipeSummary> for RecipeCard {
    fn from(recipe: &RecipeSummary) -> Self {
        RecipeCard {
            title: recipe.label.clone(),
            image: recipe.image.clone(),
            link: recipe.url.clone(),
            diet_labels: recipe.diet_labels.clone(),
            health_labels: recipe.health_labels.clone(),
        }
    }
}

impl fmt::Display for RecipeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  Image: {}", self.image)?;
        writeln!(f, "  Diet Labels: {}", self.diet_labels.join(", "))?;
        writeln!(f, "  Health Labels: {}", self.health_labels.join(", "))?;
        write!(f, "  View Recipe: {}", self.link)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientLine {
    pub code: String,
    pub label: String,
    pub quantity: f64,
    pub unit: String,
}

impl fmt::Display for NutrientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label, to_fixed(self.quantity, 2), self.unit)
    }
}

/// Nutrition analysis as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionView {
    pub title: String,
    pub calories: f64,
    pub total_weight: f64,
    pub diet_labels: Vec<String>,
    pub health_labels: Vec<String>,
    pub cautions: Vec<String>,
    /// First [`NUTRIENT_DISPLAY_LIMIT`] nutrients, in response order
    pub nutrients: Vec<NutrientLine>,
}

impl NutritionView {
    pub fn new(title: &str, analysis: &NutritionAnalysis) -> Self {
        let nutrients = analysis
            .total_nutrients
            .iter()
            .take(NUTRIENT_DISPLAY_LIMIT)
            .map(|(code, nutrient)| NutrientLine {
                code: code.to_string(),
                label: nutrient.label.clone(),
                quantity: nutrient.quantity,
                unit: nutrient.unit.clone(),
            })
            .collect();

        NutritionView {
            title: title.to_string(),
            calories: analysis.calories,
            total_weight: analysis.total_weight,
            diet_labels: analysis.diet_labels.clone(),
            health_labels: analysis.health_labels.clone(),
            cautions: analysis.cautions.clone(),
            nutrients,
        }
    }
}

impl fmt::Display for NutritionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "Calories: {} | Weight: {}g",
            to_fixed(self.calories, 0),
            to_fixed(self.total_weight, 0)
        )?;
        writeln!(f, "Diet Labels: {}", self.diet_labels.join(", "))?;
        writeln!(f, "Health Labels: {}", self.health_labels.join(", "))?;
        writeln!(f, "Cautions: {}", self.cautions.join(", "))?;
        write!(f, "Nutrients:")?;
        for nutrient in &self.nutrients {
            write!(f, "\n  {}", nutrient)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Nutrient, NutrientTable};

    fn nutrient(label: &str, quantity: f64, unit: &str) -> Nutrient {
        Nutrient {
            label: label.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }

    fn analysis_with(count: usize) -> NutritionAnalysis {
        let entries = (0..count)
            .map(|i| (format!("N{}", i), nutrient(&format!("Nutrient {}", i), i as f64 + 0.5, "g")))
            .collect();
        NutritionAnalysis {
            uri: "http://www.edamam.com/ontologies/edamam.owl#recipe_1".to_string(),
            calories: 1234.56,
            total_weight: 789.4,
            diet_labels: vec!["Low-Carb".to_string()],
            health_labels: vec!["Vegetarian".to_string(), "Peanut-Free".to_string()],
            cautions: vec!["Sulfites".to_string()],
            total_nutrients: NutrientTable::new(entries),
        }
    }

    #[test]
    fn test_view_limits_nutrients_to_five_in_order() {
        let view = NutritionView::new("Cake", &analysis_with(8));
        let codes: Vec<&str> = view.nutrients.iter().map(|n| n.code.as_str()).collect();
        assert_eq!(codes, vec!["N0", "N1", "N2", "N3", "N4"]);
    }

    #[test]
    fn test_view_with_fewer_nutrients() {
        let view = NutritionView::new("Cake", &analysis_with(2));
        assert_eq!(view.nutrients.len(), 2);
        let empty = NutritionView::new("Cake", &analysis_with(0));
        assert!(empty.nutrients.is_empty());
    }

    #[test]
    fn test_view_display_format() {
        let text = NutritionView::new("Cake", &analysis_with(1)).to_string();
        assert!(text.starts_with("Cake\n"));
        assert!(text.contains("Calories: 1235 | Weight: 789g"));
        assert!(text.contains("Diet Labels: Low-Carb"));
        assert!(text.contains("Health Labels: Vegetarian, Peanut-Free"));
        assert!(text.contains("Cautions: Sulfites"));
        assert!(text.ends_with("Nutrients:\n  Nutrient 0: 0.50 g"));
    }

    #[test]
    fn test_display_rounds_halves_up() {
        let mut analysis = analysis_with(0);
        analysis.calories = 912.5;
        analysis.total_weight = 2.5;
        analysis.total_nutrients =
            NutrientTable::new(vec![("NA".to_string(), nutrient("Sodium", 0.125, "mg"))]);

        let text = NutritionView::new("Soup", &analysis).to_string();
        assert!(text.contains("Calories: 913 | Weight: 3g"));
        assert!(text.ends_with("Sodium: 0.13 mg"));
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(1.5, 0), "2");
        assert_eq!(to_fixed(31.5, 2), "31.50");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(-2.5, 0), "-3");
    }

    #[test]
    fn test_card_maps_summary_fields() {
        let summary = RecipeSummary {
            label: "Chicken Curry".to_string(),
            image: "https://img/curry.jpg".to_string(),
            url: "https://example.com/curry".to_string(),
            diet_labels: vec!["High-Protein".to_string()],
            health_labels: vec!["Gluten-Free".to_string()],
        };
        let card = RecipeCard::from(&summary);
        assert_eq!(card.title, summary.label);
        assert_eq!(card.image, summary.image);
        assert_eq!(card.link, summary.url);
        assert_eq!(card.diet_labels, summary.diet_labels);
        assert_eq!(card.health_labels, summary.health_labels);

        let text = card.to_string();
        assert!(text.contains("View Recipe: https://example.com/curry"));
    }
}
