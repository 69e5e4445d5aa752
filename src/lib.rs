pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod plans;
pub mod shopping;
pub mod stats;
pub mod store;

pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::error::AppError;
pub use crate::shopping::{aggregate, build_shopping_list, categorize};
pub use crate::store::JsonStore;
