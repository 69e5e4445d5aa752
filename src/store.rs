use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::model::{
    MembersDoc, Metadata, PlansDoc, Rating, RatingsDoc, Recipe, RecipesDoc, WeeklyPlan,
};
use crate::plans;

const RECIPES_FILE: &str = "master_recipes.json";
const PLANS_FILE: &str = "weekly_plans.json";
const RATINGS_FILE: &str = "ratings.json";
const MEMBERS_FILE: &str = "members.json";

const PLANS_DESCRIPTION: &str = "Weekly meal plans tracking ISO week dates and selected recipes";
const RATINGS_DESCRIPTION: &str = "Recipe ratings from family members";

/// Flat-file store over the data directory. Every read loads a whole
/// document; every write rewrites it. A missing or unreadable file reads as
/// the empty document rather than an error. Read-modify-write cycles are
/// serialized through one async mutex so concurrent requests cannot
/// interleave their writes.
pub struct JsonStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        JsonStore {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory and upload folders if they do not exist.
    pub async fn ensure_dirs(&self) -> Result<(), AppError> {
        for folder in ["uploads/images", "uploads/pdfs", "uploads/processed"] {
            tokio::fs::create_dir_all(self.data_dir.join(folder)).await?;
        }
        Ok(())
    }

    async fn load<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.data_dir.join(file);
        match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(doc) => doc,
                Err(e) => {
                    error!("Error reading {}: {}", path.display(), e);
                    T::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                T::default()
            }
        }
    }

    async fn save<T: Serialize>(&self, file: &str, doc: &T) -> Result<(), AppError> {
        let path = self.data_dir.join(file);
        let json = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&path, json).await?;
        info!("Saved {}", path.display());
        Ok(())
    }

    pub async fn recipes(&self) -> RecipesDoc {
        self.load(RECIPES_FILE).await
    }

    /// Append one recipe to the catalog. Fails with a conflict when the id
    /// is already taken.
    pub async fn add_recipe(&self, recipe: Recipe) -> Result<Recipe, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut doc: RecipesDoc = self.load(RECIPES_FILE).await;
        if doc.recipes.iter().any(|r| r.id == recipe.id) {
            return Err(AppError::Conflict(format!(
                "Recipe with id '{}' already exists",
                recipe.id
            )));
        }
        doc.recipes.push(recipe.clone());
        self.save(RECIPES_FILE, &doc).await?;
        Ok(recipe)
    }

    pub async fn plans(&self) -> PlansDoc {
        self.load(PLANS_FILE).await
    }

    pub async fn replace_plans(
        &self,
        plans: Vec<WeeklyPlan>,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;
        let count = plans.len();
        let doc = PlansDoc {
            plans,
            metadata: Metadata::stamped(PLANS_DESCRIPTION, now),
        };
        self.save(PLANS_FILE, &doc).await?;
        Ok(count)
    }

    /// Record a selection as the plan for the week containing `now`,
    /// creating or updating that week's entry.
    pub async fn upsert_current_plan(
        &self,
        recipe_ids: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<WeeklyPlan, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut doc: PlansDoc = self.load(PLANS_FILE).await;
        let plan = plans::upsert_week(&mut doc.plans, recipe_ids, now);
        doc.metadata = Metadata::stamped(PLANS_DESCRIPTION, now);
        self.save(PLANS_FILE, &doc).await?;
        Ok(plan)
    }

    pub async fn ratings(&self) -> RatingsDoc {
        self.load(RATINGS_FILE).await
    }

    pub async fn replace_ratings(
        &self,
        ratings: Vec<Rating>,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;
        let count = ratings.len();
        let doc = RatingsDoc {
            ratings,
            metadata: Metadata::stamped(RATINGS_DESCRIPTION, now),
        };
        self.save(RATINGS_FILE, &doc).await?;
        Ok(count)
    }

    pub async fn add_rating(&self, rating: Rating, now: DateTime<Utc>) -> Result<Rating, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut doc: RatingsDoc = self.load(RATINGS_FILE).await;
        doc.ratings.push(rating.clone());
        doc.metadata = Metadata::stamped(RATINGS_DESCRIPTION, now);
        self.save(RATINGS_FILE, &doc).await?;
        Ok(rating)
    }

    pub async fn members(&self) -> MembersDoc {
        self.load(MEMBERS_FILE).await
    }
}
