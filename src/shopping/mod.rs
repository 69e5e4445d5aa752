//! Shopping-list engine: selected recipes are folded into deduplicated,
//! unit-aware lines, then partitioned into six fixed grocery categories.
//! Pure computation, no I/O; the result lives for one response and is never
//! persisted.

mod aggregator;
mod classifier;
mod render;

pub use self::aggregator::{aggregate, parse_amount, AggregatedLine};
pub use self::classifier::{categorize, classify, CategorizedList, Category, DISPLAY_ORDER};
pub use self::render::render_shopping_list;

use crate::model::Recipe;

/// Run both engine stages over an ordered selection.
pub fn build_shopping_list(selection: &[Recipe]) -> CategorizedList {
    categorize(aggregate(selection))
}
