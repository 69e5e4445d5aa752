use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::model::{MembersDoc, Rating, RatingsDoc};
use crate::stats::{favorites, favorites_for};

pub async fn list(State(state): State<AppState>) -> Json<RatingsDoc> {
    Json(state.store.ratings().await)
}

#[derive(Debug, Deserialize)]
pub struct RatingsBody {
    ratings: Option<Vec<Rating>>,
}

/// Wholesale replace of the ratings file.
pub async fn replace(
    State(state): State<AppState>,
    Json(body): Json<RatingsBody>,
) -> Result<Json<Value>, AppError> {
    let ratings = body.ratings.ok_or_else(|| {
        AppError::InvalidInput("Invalid data: ratings must be an array".to_string())
    })?;
    let count = state.store.replace_ratings(ratings, Utc::now()).await?;
    Ok(Json(
        json!({ "success": true, "message": "Ratings saved", "count": count }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    #[serde(default)]
    user: String,
    #[serde(default)]
    recipe: String,
    #[serde(default)]
    score: u8,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    date_formatted: Option<String>,
}

pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<NewRating>,
) -> Result<Json<Value>, AppError> {
    if body.user.trim().is_empty() || body.recipe.trim().is_empty() || body.score < 1 {
        return Err(AppError::InvalidInput(
            "Invalid rating: requires user, recipe, and score".to_string(),
        ));
    }

    let now = Utc::now();
    let rating = Rating {
        user: body.user,
        recipe: body.recipe,
        score: body.score,
        date: body.date.unwrap_or(now),
        date_formatted: body.date_formatted,
    };
    let saved = state.store.add_rating(rating, now).await?;

    Ok(Json(
        json!({ "success": true, "message": "Rating added", "rating": saved }),
    ))
}

/// Overall favorites plus one favorites list per household member.
pub async fn stats(State(state): State<AppState>) -> Json<Value> {
    let ratings = state.store.ratings().await.ratings;
    let members = state.store.members().await.members;

    let per_member: Vec<Value> = members
        .iter()
        .map(|member| {
            json!({
                "member": member.name,
                "favorites": favorites_for(&ratings, &member.name),
            })
        })
        .collect();

    Json(json!({
        "overall": favorites(&ratings),
        "perMember": per_member,
    }))
}

pub async fn members(State(state): State<AppState>) -> Json<MembersDoc> {
    Json(state.store.members().await)
}
