use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use super::ingredients::split_ingredient;
use super::Extractor;
use crate::error::AppError;
use crate::model::{slugify, Recipe};

pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<CategoryType>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<YieldType>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryType {
    String(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldType {
    Number(u32),
    String(String),
    Multiple(Vec<YieldType>),
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

impl JsonLdRecipe {
    fn category(&self) -> String {
        match &self.recipe_category {
            Some(CategoryType::String(c)) => decode_html_symbols(c),
            Some(CategoryType::Multiple(cs)) => cs
                .first()
                .map(|c| decode_html_symbols(c))
                .unwrap_or_else(|| "Imported".to_string()),
            None => "Imported".to_string(),
        }
    }

    fn servings(&self) -> u32 {
        match &self.recipe_yield {
            Some(y) => leading_yield(y).unwrap_or(4),
            None => 4,
        }
    }
}

fn leading_yield(value: &YieldType) -> Option<u32> {
    match value {
        YieldType::Number(n) => Some(*n),
        YieldType::String(text) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        YieldType::Multiple(values) => values.iter().find_map(leading_yield),
    }
}

/// Minutes in an ISO-8601 duration like `PT1H15M`. Anything unrecognized
/// counts as zero.
fn duration_minutes(value: &str) -> u32 {
    let mut minutes = 0.0f64;
    let mut digits = String::new();
    let mut in_time = false;

    for c in value.chars() {
        match c {
            'T' | 't' => {
                in_time = true;
                digits.clear();
            }
            '0'..='9' | '.' => digits.push(c),
            'D' | 'd' if !in_time => {
                minutes += digits.parse::<f64>().unwrap_or(0.0) * 1440.0;
                digits.clear();
            }
            'H' | 'h' if in_time => {
                minutes += digits.parse::<f64>().unwrap_or(0.0) * 60.0;
                digits.clear();
            }
            'M' | 'm' if in_time => {
                minutes += digits.parse::<f64>().unwrap_or(0.0);
                digits.clear();
            }
            _ => digits.clear(),
        }
    }

    minutes.round() as u32
}

impl From<JsonLdRecipe> for Recipe {
    fn from(json_ld: JsonLdRecipe) -> Self {
        let name = decode_html_symbols(&json_ld.name);
        Recipe {
            id: slugify(&name),
            category: json_ld.category(),
            prep_time: json_ld
                .prep_time
                .as_deref()
                .map(duration_minutes)
                .unwrap_or(0),
            cook_time: json_ld
                .cook_time
                .as_deref()
                .map(duration_minutes)
                .unwrap_or(0),
            servings: json_ld.servings(),
            ingredients: Some(
                json_ld
                    .recipe_ingredient
                    .iter()
                    .map(|line| split_ingredient(&decode_html_symbols(line)))
                    .collect(),
            ),
            name,
        }
    }
}

// Clean up malformed JSON-LD blocks seen in the wild before parsing.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace(r"<!--", "").replace("-->", "");

    cleaned
}

fn is_recipe_value(value: &Value) -> bool {
    if value.get("recipeIngredient").is_some() {
        return true;
    }
    match value.get("@type") {
        Some(Value::String(t)) => t == "Recipe",
        Some(Value::Array(types)) => types.iter().any(|t| t == "Recipe"),
        _ => false,
    }
}

/// Find the schema.org Recipe node in a parsed JSON-LD block, looking
/// through top-level objects, arrays, and `@graph` containers.
fn find_recipe_value(json_ld: &Value) -> Option<&Value> {
    if json_ld.is_array() {
        return json_ld
            .as_array()
            .and_then(|arr| arr.iter().find(|item| is_recipe_value(item)));
    }
    if is_recipe_value(json_ld) {
        return Some(json_ld);
    }
    json_ld
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|arr| arr.iter().find(|item| is_recipe_value(item)))
}

impl Extractor for JsonLdExtractor {
    fn can_parse(&self, document: &Html) -> bool {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        document.select(&selector).any(|script| {
            let cleaned_json = sanitize_json(&script.inner_html());
            match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json_ld) => find_recipe_value(&json_ld).is_some(),
                Err(_) => false,
            }
        })
    }

    fn parse(&self, document: &Html) -> Result<Recipe, AppError> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        // Try each script element until we find a valid recipe
        for script in document.select(&selector) {
            let cleaned_json = sanitize_json(&script.inner_html());
            let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned_json) else {
                continue;
            };
            let Some(value) = find_recipe_value(&json_ld) else {
                continue;
            };
            match serde_json::from_value::<JsonLdRecipe>(value.clone()) {
                Ok(recipe) => return Ok(recipe.into()),
                Err(e) => debug!("JSON-LD block did not deserialize as a recipe: {}", e),
            }
        }

        Err(AppError::NoRecipeFound)
    }
}
