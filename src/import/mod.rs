//! Recipe import: fetch a web page and extract its schema.org Recipe into
//! the catalog model. Imported recipes are returned to the caller, not
//! persisted.

use std::time::Duration;

use log::{debug, error};
use reqwest::header::{HeaderMap, USER_AGENT};
use scraper::Html;

use crate::error::AppError;
use crate::model::Recipe;

mod ingredients;
mod json_ld;

pub use self::ingredients::split_ingredient;
pub use self::json_ld::JsonLdExtractor;

pub trait Extractor {
    fn can_parse(&self, document: &Html) -> bool;
    fn parse(&self, document: &Html) -> Result<Recipe, AppError>;
}

/// Fetch `url` and extract the recipe it describes.
pub async fn import_recipe(url: &str, timeout_secs: u64) -> Result<Recipe, AppError> {
    // Set up headers with a user agent
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            .parse()
            .map_err(|_| AppError::InvalidInput("Invalid user agent header".to_string()))?,
    );

    let body = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .build()?
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    extract_recipe(&body)
}

/// Parse fetched HTML and run the extractor over it. Synchronous so the
/// non-`Send` parsed document never crosses an await point.
pub fn extract_recipe(body: &str) -> Result<Recipe, AppError> {
    let document = Html::parse_document(body);

    let extractor = JsonLdExtractor;
    if extractor.can_parse(&document) {
        let recipe = extractor.parse(&document)?;
        debug!("{:#?}", recipe);
        Ok(recipe)
    } else {
        error!("No extractor found to parse the recipe from this webpage.");
        Err(AppError::NoRecipeFound)
    }
}
