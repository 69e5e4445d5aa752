use serde::Serialize;

use crate::model::Recipe;

/// One deduplicated shopping-list row combining every selected recipe's
/// contribution of the same ingredient.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregatedLine {
    /// Lower-cased item name used to merge duplicates across recipes.
    pub key: String,
    /// Display name; the first-seen casing wins.
    pub item: String,
    pub amount: String,
    /// Cleared to `""` once contributions with mismatched units force a
    /// textual merge; stays cleared for the rest of the run.
    pub unit: String,
    /// Taken from the first occurrence, never updated by later merges.
    pub additional: String,
    /// Names of the recipes that use this ingredient, insertion order,
    /// no duplicates.
    pub recipes: Vec<String>,
}

/// Fold the ingredients of the selected recipes into one deduplicated list,
/// keyed by lower-cased item name, in first-seen order.
///
/// Amounts are summed numerically when both sides parse as numbers and the
/// unit strings match exactly; otherwise the amounts are joined textually.
/// Nothing in here can fail: unparsable amounts degrade to concatenation,
/// and a recipe without an ingredients list contributes nothing.
pub fn aggregate(recipes: &[Recipe]) -> Vec<AggregatedLine> {
    let mut lines: Vec<AggregatedLine> = Vec::new();

    for recipe in recipes {
        let Some(ingredients) = &recipe.ingredients else {
            continue;
        };

        for ingredient in ingredients {
            let key = ingredient.item.to_lowercase();

            match lines.iter_mut().find(|line| line.key == key) {
                None => lines.push(AggregatedLine {
                    key,
                    item: ingredient.item.clone(),
                    amount: ingredient.amount.clone(),
                    unit: ingredient.unit.clone(),
                    additional: ingredient.additional.clone().unwrap_or_default(),
                    recipes: vec![recipe.name.clone()],
                }),
                Some(line) => {
                    if line.unit == ingredient.unit {
                        match (parse_amount(&line.amount), parse_amount(&ingredient.amount)) {
                            (Some(current), Some(new)) => {
                                line.amount = (current + new).to_string();
                            }
                            _ => {
                                line.amount = format!("{} + {}", line.amount, ingredient.amount);
                            }
                        }
                    } else {
                        line.amount = format!(
                            "{} {} + {} {}",
                            line.amount, line.unit, ingredient.amount, ingredient.unit
                        );
                        line.unit = String::new();
                    }

                    if !line.recipes.iter().any(|name| name == &recipe.name) {
                        line.recipes.push(recipe.name.clone());
                    }
                }
            }
        }
    }

    lines
}

/// Parse the longest numeric prefix of a trimmed amount string as `f64`,
/// matching `parseFloat` permissiveness. `None` routes the merge to the
/// textual-concatenation branch.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let mut parsed = None;

    let ends = trimmed
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain([trimmed.len()]);
    for end in ends {
        if let Ok(value) = trimmed[..end].parse::<f64>() {
            if value.is_finite() {
                parsed = Some(value);
            }
        }
    }

    parsed
}
