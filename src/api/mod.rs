//! HTTP surface: JSON API routes plus static serving of the data
//! directory. All state lives in [`AppState`]; handlers stay thin and call
//! into the store and the engine.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::store::JsonStore;

mod plans;
mod ratings;
mod recipes;
mod shopping;
mod uploads;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: JsonStore, config: AppConfig) -> Self {
        AppState {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let data_dir = state.store.data_dir().to_path_buf();
    let max_body = state.config.max_upload_bytes;

    Router::new()
        .route("/api/recipes", get(recipes::list).post(recipes::add))
        .route("/api/recipes/import", post(recipes::import))
        .route("/api/plans", get(plans::list).post(plans::replace))
        .route("/api/ratings", get(ratings::list).post(ratings::replace))
        .route("/api/ratings/add", post(ratings::add))
        .route("/api/stats", get(ratings::stats))
        .route("/api/members", get(ratings::members))
        .route("/api/shopping-list", post(shopping::generate))
        .route("/api/upload", post(uploads::single))
        .route("/api/upload/multiple", post(uploads::multiple))
        .route("/api/uploads", get(uploads::list))
        .route("/api/uploads/:folder/:filename", delete(uploads::remove))
        .nest_service("/data", ServeDir::new(data_dir))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
