use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::model::{PlansDoc, WeeklyPlan};

pub async fn list(State(state): State<AppState>) -> Json<PlansDoc> {
    Json(state.store.plans().await)
}

#[derive(Debug, Deserialize)]
pub struct PlansBody {
    plans: Option<Vec<WeeklyPlan>>,
}

/// Wholesale replace of the plan history.
pub async fn replace(
    State(state): State<AppState>,
    Json(body): Json<PlansBody>,
) -> Result<Json<Value>, AppError> {
    let plans = body.plans.ok_or_else(|| {
        AppError::InvalidInput("Invalid data: plans must be an array".to_string())
    })?;
    let count = state.store.replace_plans(plans, Utc::now()).await?;
    Ok(Json(
        json!({ "success": true, "message": "Weekly plans saved", "count": count }),
    ))
}
