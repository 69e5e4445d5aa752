use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::import;
use crate::model::{slugify, Ingredient, Recipe, RecipesDoc};

pub async fn list(State(state): State<AppState>) -> Json<RecipesDoc> {
    Json(state.store.recipes().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[serde(default)]
    id: Option<String>,
    name: String,
    category: String,
    #[serde(default)]
    prep_time: u32,
    #[serde(default)]
    cook_time: u32,
    servings: u32,
    #[serde(default)]
    ingredients: Option<Vec<Ingredient>>,
}

pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<NewRecipe>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Invalid recipe: name must not be empty".to_string(),
        ));
    }

    let id = body
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| slugify(&body.name));
    if id.is_empty() {
        return Err(AppError::InvalidInput(
            "Invalid recipe: could not derive an id from the name".to_string(),
        ));
    }

    let recipe = Recipe {
        id,
        name: body.name,
        category: body.category,
        prep_time: body.prep_time,
        cook_time: body.cook_time,
        servings: body.servings,
        ingredients: body.ingredients,
    };
    let saved = state.store.add_recipe(recipe).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Recipe added", "recipe": saved })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    url: String,
}

/// Extract a recipe from an external page. The result is returned for
/// review, not written to the catalog.
pub async fn import(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> Result<Json<Recipe>, AppError> {
    if body.url.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Invalid request: url must not be empty".to_string(),
        ));
    }
    let recipe = import::import_recipe(&body.url, state.config.import_timeout_secs).await?;
    Ok(Json(recipe))
}
