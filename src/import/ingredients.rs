use crate::model::Ingredient;

/// Measurement words recognized as the unit token after a leading number.
const UNITS: &[&str] = &[
    "cup", "cups", "tbsp", "tablespoon", "tablespoons", "tsp", "teaspoon", "teaspoons", "oz",
    "ounce", "ounces", "lb", "lbs", "pound", "pounds", "g", "gram", "grams", "kg", "ml", "l",
    "liter", "liters", "clove", "cloves", "can", "cans", "jar", "jars", "slice", "slices",
    "stick", "sticks", "pinch", "package", "packages", "bunch", "head", "heads",
];

fn is_unit(token: &str) -> bool {
    UNITS.contains(&token.to_lowercase().as_str())
}

/// Split a free-text ingredient line into the catalog's `{amount, unit,
/// item, additional}` shape.
///
/// Only a leading plain number is recognized as an amount (no words,
/// ranges, or vulgar fractions); an optional following token from the unit
/// vocabulary becomes the unit, a leading `of ` on the remainder is
/// dropped, and text after the first comma becomes the qualifier. Lines
/// with no leading number are stored whole in `item`.
pub fn split_ingredient(line: &str) -> Ingredient {
    let text = line.trim();
    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");

    if first.is_empty() || first.parse::<f64>().is_err() {
        return Ingredient {
            item: text.to_string(),
            amount: String::new(),
            unit: String::new(),
            additional: None,
        };
    }

    let rest = parts.next().unwrap_or("").trim_start();
    let (unit, remainder) = match rest.split_once(char::is_whitespace) {
        Some((token, tail)) if is_unit(token) => (token.to_string(), tail.trim_start()),
        _ if is_unit(rest) => (rest.to_string(), ""),
        _ => (String::new(), rest),
    };

    let remainder = remainder.strip_prefix("of ").unwrap_or(remainder);
    let (item, additional) = match remainder.split_once(',') {
        Some((item, qualifier)) => {
            let qualifier = qualifier.trim();
            (
                item.trim(),
                (!qualifier.is_empty()).then(|| qualifier.to_string()),
            )
        }
        None => (remainder.trim(), None),
    };

    Ingredient {
        item: item.to_string(),
        amount: first.to_string(),
        unit,
        additional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_unit_item() {
        let ing = split_ingredient("2 cups flour");
        assert_eq!(ing.amount, "2");
        assert_eq!(ing.unit, "cups");
        assert_eq!(ing.item, "flour");
        assert_eq!(ing.additional, None);
    }

    #[test]
    fn test_decimal_amount_without_unit() {
        let ing = split_ingredient("1.5 red onions");
        assert_eq!(ing.amount, "1.5");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.item, "red onions");
    }

    #[test]
    fn test_of_prefix_dropped() {
        let ing = split_ingredient("3 cloves of garlic");
        assert_eq!(ing.amount, "3");
        assert_eq!(ing.unit, "cloves");
        assert_eq!(ing.item, "garlic");
    }

    #[test]
    fn test_comma_becomes_additional() {
        let ing = split_ingredient("1 lb chicken breast, cut into strips");
        assert_eq!(ing.amount, "1");
        assert_eq!(ing.unit, "lb");
        assert_eq!(ing.item, "chicken breast");
        assert_eq!(ing.additional.as_deref(), Some("cut into strips"));
    }

    #[test]
    fn test_no_leading_number_kept_whole() {
        let ing = split_ingredient("salt and pepper to taste");
        assert_eq!(ing.amount, "");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.item, "salt and pepper to taste");
    }

    #[test]
    fn test_range_not_parsed_as_amount() {
        // Ranges are out of scope; the whole line becomes the item.
        let ing = split_ingredient("2-3 tomatoes");
        assert_eq!(ing.amount, "");
        assert_eq!(ing.item, "2-3 tomatoes");
    }

    #[test]
    fn test_unit_word_required_after_amount() {
        let ing = split_ingredient("2 large eggs");
        assert_eq!(ing.amount, "2");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.item, "large eggs");
    }
}
