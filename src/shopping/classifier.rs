use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::aggregator::AggregatedLine;

/// Grocery category assigned to every shopping-list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Produce,
    MeatPoultry,
    DairyEggs,
    Pantry,
    SpicesSeasonings,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::MeatPoultry => "Meat & Poultry",
            Category::DairyEggs => "Dairy & Eggs",
            Category::Pantry => "Pantry",
            Category::SpicesSeasonings => "Spices & Seasonings",
            Category::Other => "Other",
        }
    }
}

/// Bucket order used for display and serialization.
pub const DISPLAY_ORDER: [Category; 6] = [
    Category::Produce,
    Category::MeatPoultry,
    Category::DairyEggs,
    Category::Pantry,
    Category::SpicesSeasonings,
    Category::Other,
];

// Keyword lists checked by substring containment, in this exact order;
// the first match wins. "pepper" and "basil" appear in two lists each, so
// reordering would change how those ingredients classify.
const CHECK_ORDER: [(Category, &[&str]); 5] = [
    (
        Category::Produce,
        &[
            "onion", "garlic", "tomato", "spinach", "kale", "pepper", "vegetable", "carrot",
            "broccoli", "basil", "lemon", "shallot",
        ],
    ),
    (Category::MeatPoultry, &["chicken", "beef", "sausage", "steak"]),
    (
        Category::DairyEggs,
        &["cream", "cheese", "butter", "ricotta", "mozzarella", "parmesan", "milk"],
    ),
    (
        Category::SpicesSeasonings,
        &["salt", "pepper", "seasoning", "paprika", "basil", "oregano", "flakes", "bouillon"],
    ),
    (
        Category::Pantry,
        &[
            "pasta", "rice", "flour", "oil", "sauce", "broth", "stock", "vinegar", "mustard",
            "bourbon", "wine", "tortellini", "ravioli", "honey",
        ],
    ),
];

/// The six fixed buckets of a generated shopping list, always all present,
/// in display order. Serializes as a map of category label to lines, so the
/// JSON matches the shape the frontend renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedList {
    buckets: Vec<(Category, Vec<AggregatedLine>)>,
}

impl CategorizedList {
    fn new() -> Self {
        CategorizedList {
            buckets: DISPLAY_ORDER
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
        }
    }

    fn push(&mut self, category: Category, line: AggregatedLine) {
        if let Some((_, lines)) = self.buckets.iter_mut().find(|(c, _)| *c == category) {
            lines.push(line);
        }
    }

    pub fn bucket(&self, category: Category) -> &[AggregatedLine] {
        self.buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or(&[])
    }

    /// Buckets in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[AggregatedLine])> {
        self.buckets
            .iter()
            .map(|(category, lines)| (*category, lines.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|(_, lines)| lines.is_empty())
    }
}

impl Serialize for CategorizedList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (category, lines) in &self.buckets {
            map.serialize_entry(category.label(), lines)?;
        }
        map.end()
    }
}

/// Assign a category by substring match against the keyword lists, falling
/// back to `Other`.
pub fn classify(item: &str) -> Category {
    let item_lower = item.to_lowercase();
    for (category, keywords) in &CHECK_ORDER {
        if keywords.iter().any(|keyword| item_lower.contains(keyword)) {
            return *category;
        }
    }
    Category::Other
}

/// Partition aggregated lines into the six category buckets, preserving the
/// aggregator's line order within each bucket. Cannot fail: every line lands
/// in exactly one bucket.
pub fn categorize(lines: Vec<AggregatedLine>) -> CategorizedList {
    let mut list = CategorizedList::new();
    for line in lines {
        let category = classify(&line.item);
        list.push(category, line);
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item: &str) -> AggregatedLine {
        AggregatedLine {
            key: item.to_lowercase(),
            item: item.to_string(),
            amount: "1".to_string(),
            unit: String::new(),
            additional: String::new(),
            recipes: vec!["Test".to_string()],
        }
    }

    #[test]
    fn test_classify_each_category() {
        assert_eq!(classify("Yellow Onion"), Category::Produce);
        assert_eq!(classify("Chicken Breast"), Category::MeatPoultry);
        assert_eq!(classify("Heavy Cream"), Category::DairyEggs);
        assert_eq!(classify("Penne Pasta"), Category::Pantry);
        assert_eq!(classify("Kosher Salt"), Category::SpicesSeasonings);
        assert_eq!(classify("Sriracha"), Category::Other);
    }

    #[test]
    fn test_classify_is_case_insensitive_substring() {
        assert_eq!(classify("GARLIC POWDER"), Category::Produce);
        assert_eq!(classify("sun-dried tomatoes"), Category::Produce);
    }

    #[test]
    fn test_pepper_overlap_resolved_by_check_order() {
        // "pepper" is in both the produce and spice lists; produce is
        // checked first, so anything containing it lands there.
        assert_eq!(classify("Black Pepper"), Category::Produce);
        assert_eq!(classify("Red Pepper Flakes"), Category::Produce);
        // "flakes" alone only matches the spice list.
        assert_eq!(classify("Chili Flakes"), Category::SpicesSeasonings);
    }

    #[test]
    fn test_earlier_lists_win() {
        assert_eq!(classify("Bouillon Cube"), Category::SpicesSeasonings);
        // "chicken" hits the meat list before "bouillon" is ever checked.
        assert_eq!(classify("Chicken Bouillon"), Category::MeatPoultry);
        // An item matching both spice and pantry keywords goes to spices.
        assert_eq!(classify("Salted Rice"), Category::SpicesSeasonings);
    }

    #[test]
    fn test_buckets_always_present() {
        let list = categorize(vec![line("Sriracha")]);
        let labels: Vec<&str> = list.iter().map(|(c, _)| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Produce",
                "Meat & Poultry",
                "Dairy & Eggs",
                "Pantry",
                "Spices & Seasonings",
                "Other"
            ]
        );
        assert_eq!(list.bucket(Category::Other).len(), 1);
        assert!(list.bucket(Category::Produce).is_empty());
    }

    #[test]
    fn test_bucket_order_follows_input_order() {
        let list = categorize(vec![line("Carrot"), line("Shallot"), line("Kale")]);
        let produce: Vec<&str> = list
            .bucket(Category::Produce)
            .iter()
            .map(|l| l.item.as_str())
            .collect();
        assert_eq!(produce, vec!["Carrot", "Shallot", "Kale"]);
    }

    #[test]
    fn test_serializes_as_labeled_map_in_display_order() {
        let list = categorize(vec![line("Sriracha")]);
        let json = serde_json::to_string(&list).unwrap();
        let produce = json.find("\"Produce\"").unwrap();
        let other = json.find("\"Other\"").unwrap();
        assert!(produce < other);
        assert!(json.contains("\"Spices & Seasonings\":[]"));
    }
}
