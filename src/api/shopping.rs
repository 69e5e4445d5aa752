use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::model::Recipe;
use crate::shopping::{build_shopping_list, render_shopping_list};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingRequest {
    #[serde(default)]
    recipe_ids: Vec<String>,
}

/// Resolve the posted selection against the catalog (unknown ids are
/// skipped), record it as this week's plan, and run the aggregation and
/// categorization engine. An empty selection is not an error: it yields six
/// empty buckets.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<ShoppingRequest>,
) -> Result<Json<Value>, AppError> {
    let catalog = state.store.recipes().await;
    let selection: Vec<Recipe> = body
        .recipe_ids
        .iter()
        .filter_map(|id| catalog.recipes.iter().find(|r| &r.id == id).cloned())
        .collect();

    let now = Utc::now();
    let selected_ids: Vec<String> = selection.iter().map(|r| r.id.clone()).collect();
    let plan = state.store.upsert_current_plan(selected_ids, now).await?;

    let list = build_shopping_list(&selection);
    let html = render_shopping_list(&selection, &list);

    let recipes: Vec<Value> = selection
        .iter()
        .map(|r| json!({ "id": r.id, "name": r.name, "servings": r.servings }))
        .collect();

    Ok(Json(json!({
        "week": plan,
        "recipes": recipes,
        "categories": list,
        "html": html,
    })))
}
