use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingredient line as stored in the recipe catalog.
///
/// `amount` is kept as a string: it may be a plain number (`"2"`, `"1.5"`),
/// a compound phrase produced by shopping-list merging, or the sentinel
/// `"to taste"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    pub servings: u32,
    /// Absent for catalog entries that have not been fleshed out yet;
    /// such recipes contribute nothing to a shopping list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
}

/// One saved weekly plan. At most one plan exists per ISO week; re-saving
/// the same week updates `recipe_ids`/`updated_at` in place and keeps the
/// original `plan_id`/`created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub plan_id: i64,
    pub iso_week: String,
    pub year: i32,
    pub week: u32,
    pub recipe_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user: String,
    pub recipe: String,
    pub score: u8,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_formatted: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub name: String,
}

/// Bookkeeping block carried by the plans and ratings files; restamped on
/// every write.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

impl Metadata {
    pub fn stamped(description: &str, now: DateTime<Utc>) -> Self {
        Metadata {
            version: "1.0".to_string(),
            last_updated: Some(now),
            description: description.to_string(),
        }
    }
}

// Document wrappers mirroring the on-disk JSON files.

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecipesDoc {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlansDoc {
    #[serde(default)]
    pub plans: Vec<WeeklyPlan>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RatingsDoc {
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MembersDoc {
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Turn a recipe name into a catalog id: lower-cased, alphanumerics kept,
/// runs of anything else collapsed into single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
