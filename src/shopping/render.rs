use html_escape::encode_text;

use super::aggregator::AggregatedLine;
use super::classifier::CategorizedList;
use crate::model::Recipe;

/// Render the printable shopping-list fragment: a header naming the selected
/// recipes, then one section per non-empty category. All user-controlled
/// text is escaped.
pub fn render_shopping_list(selection: &[Recipe], list: &CategorizedList) -> String {
    let mut html = String::from(
        "<div class=\"selected-recipes-info\">\n<h3>Recipes for this week:</h3>\n<ul>\n",
    );
    for recipe in selection {
        html.push_str(&format!(
            "<li><strong>{}</strong> ({} servings)</li>\n",
            encode_text(&recipe.name),
            recipe.servings
        ));
    }
    html.push_str("</ul>\n</div>\n");

    for (category, lines) in list.iter() {
        if lines.is_empty() {
            continue;
        }
        html.push_str(&format!(
            "<div class=\"shopping-category\">\n<h3>{}</h3>\n<ul>\n",
            encode_text(category.label())
        ));
        for line in lines {
            html.push_str(&render_line(line));
        }
        html.push_str("</ul>\n</div>\n");
    }

    html
}

fn render_line(line: &AggregatedLine) -> String {
    let amount = display_amount(&line.amount, &line.unit);
    let additional = if line.additional.is_empty() {
        String::new()
    } else {
        format!(" ({})", encode_text(&line.additional))
    };
    let recipes = encode_text(&line.recipes.join(", ")).into_owned();
    format!(
        "<li><input type=\"checkbox\"> <strong>{}</strong> {}{} <span class=\"from-recipes\">{}</span></li>\n",
        encode_text(&amount),
        encode_text(&line.item),
        additional,
        recipes
    )
}

/// `"to taste"` and empty amounts are shown without a unit; everything else
/// as `"<amount> <unit>"` with the trailing space trimmed when the unit is
/// empty.
fn display_amount(amount: &str, unit: &str) -> String {
    if amount.is_empty() || amount == "to taste" {
        amount.to_string()
    } else {
        format!("{} {}", amount, unit).trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;
    use crate::shopping::{aggregate, categorize};

    fn recipe(name: &str, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: crate::model::slugify(name),
            name: name.to_string(),
            category: "Test".to_string(),
            prep_time: 0,
            cook_time: 0,
            servings: 4,
            ingredients: Some(ingredients),
        }
    }

    fn ingredient(item: &str, amount: &str, unit: &str) -> Ingredient {
        Ingredient {
            item: item.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
            additional: None,
        }
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(display_amount("2", "cup"), "2 cup");
        assert_eq!(display_amount("2 tbsp + 1 stick", ""), "2 tbsp + 1 stick");
        assert_eq!(display_amount("to taste", "tsp"), "to taste");
        assert_eq!(display_amount("", ""), "");
    }

    #[test]
    fn test_empty_buckets_are_skipped() {
        let selection = vec![recipe("A", vec![ingredient("Sriracha", "1", "tbsp")])];
        let list = categorize(aggregate(&selection));
        let html = render_shopping_list(&selection, &list);
        assert!(html.contains("<h3>Other</h3>"));
        assert!(!html.contains("<h3>Produce</h3>"));
    }

    #[test]
    fn test_header_lists_selection_with_servings() {
        let selection = vec![recipe("Marry Me Chicken", vec![])];
        let list = categorize(aggregate(&selection));
        let html = render_shopping_list(&selection, &list);
        assert!(html.contains("<strong>Marry Me Chicken</strong> (4 servings)"));
    }

    #[test]
    fn test_additional_and_recipes_rendered() {
        let mut first = ingredient("Onion", "1", "");
        first.additional = Some("diced".to_string());
        let selection = vec![recipe("A", vec![first])];
        let list = categorize(aggregate(&selection));
        let html = render_shopping_list(&selection, &list);
        assert!(html.contains("Onion (diced)"));
        assert!(html.contains("<span class=\"from-recipes\">A</span>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let selection = vec![recipe(
            "<script>alert(1)</script>",
            vec![ingredient("Chives & Herbs", "1", "")],
        )];
        let list = categorize(aggregate(&selection));
        let html = render_shopping_list(&selection, &list);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("Chives &amp; Herbs"));
    }
}
