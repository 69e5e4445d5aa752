use serde::Serialize;

use crate::model::Rating;

/// Average score for one recipe, rounded to one decimal as the dashboard
/// displays it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeStat {
    pub recipe: String,
    pub average: f64,
    pub count: usize,
}

/// Per-recipe averages across all ratings, sorted by average descending.
/// Ties keep the first-seen order of recipes in the ratings list, so the
/// output is deterministic for a fixed input.
pub fn favorites(ratings: &[Rating]) -> Vec<RecipeStat> {
    let mut stats: Vec<RecipeStat> = Vec::new();

    for rating in ratings {
        if stats.iter().any(|s| s.recipe == rating.recipe) {
            continue;
        }
        let scores: Vec<u8> = ratings
            .iter()
            .filter(|r| r.recipe == rating.recipe)
            .map(|r| r.score)
            .collect();
        let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
        let average = round_one_decimal(f64::from(sum) / scores.len() as f64);
        stats.push(RecipeStat {
            recipe: rating.recipe.clone(),
            average,
            count: scores.len(),
        });
    }

    stats.sort_by(|a, b| b.average.total_cmp(&a.average));
    stats
}

/// Same as [`favorites`] but restricted to one household member's ratings.
pub fn favorites_for(ratings: &[Rating], user: &str) -> Vec<RecipeStat> {
    let personal: Vec<Rating> = ratings
        .iter()
        .filter(|r| r.user == user)
        .cloned()
        .collect();
    favorites(&personal)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
