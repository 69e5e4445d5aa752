use dinner_time::model::{slugify, Ingredient, Recipe};
use dinner_time::shopping::{aggregate, build_shopping_list, categorize, Category};

fn recipe(name: &str, ingredients: Option<Vec<Ingredient>>) -> Recipe {
    Recipe {
        id: slugify(name),
        name: name.to_string(),
        category: "Test".to_string(),
        prep_time: 0,
        cook_time: 0,
        servings: 4,
        ingredients,
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
fn test_repeated_runs_are_byte_identical() {
    let selection = vec![
        recipe(
            "A",
            Some(vec![
                ingredient("Chicken Breast", "2", "lb"),
                ingredient("Olive Oil", "2", "tbsp"),
                ingredient("Salt", "to taste", ""),
            ]),
        ),
        recipe(
            "B",
            Some(vec![
                ingredient("chicken breast", "1", "lb"),
                ingredient("Garlic", "3", "clove"),
            ]),
        ),
    ];

    let first = serde_json::to_string(&build_shopping_list(&selection)).unwrap();
    let second = serde_json::to_string(&build_shopping_list(&selection)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_one_line_per_case_insensitive_name() {
    let selection = vec![
        recipe(
            "A",
            Some(vec![
                ingredient("Onion", "1", ""),
                ingredient("ONION", "1", ""),
            ]),
        ),
        recipe("B", Some(vec![ingredient("onion", "1", "")])),
    ];
    let lines = aggregate(&selection);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].key, "onion");
    assert_eq!(lines[0].item, "Onion");
    assert_eq!(lines[0].amount, "3");
}

#[test]
fn test_numeric_merge_with_matching_unit() {
    let selection = vec![
        recipe("A", Some(vec![ingredient("Onion", "2", "cup")])),
        recipe("B", Some(vec![ingredient("onion", "1", "cup")])),
    ];
    let lines = aggregate(&selection);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].amount, "3");
    assert_eq!(lines[0].unit, "cup");
    assert_eq!(lines[0].recipes, vec!["A", "B"]);
}

#[test]
fn test_unit_mismatch_concatenates_and_clears_unit() {
    let selection = vec![
        recipe("A", Some(vec![ingredient("Salt", "to taste", "")])),
        recipe("B", Some(vec![ingredient("salt", "1", "tsp")])),
    ];
    let lines = aggregate(&selection);
    assert_eq!(lines[0].amount, "to taste  + 1 tsp");
    assert_eq!(lines[0].unit, "");
}

#[test]
fn test_unit_clearing_is_irreversible() {
    let selection = vec![
        recipe("A", Some(vec![ingredient("Butter", "2", "tbsp")])),
        recipe("B", Some(vec![ingredient("butter", "1", "cup")])),
        // Matches the original unit, but the cleared unit forces the
        // textual path anyway.
        recipe("C", Some(vec![ingredient("Butter", "3", "tbsp")])),
    ];
    let lines = aggregate(&selection);
    assert_eq!(lines[0].amount, "2 tbsp + 1 cup  + 3 tbsp");
    assert_eq!(lines[0].unit, "");
}

#[test]
fn test_classification_follows_check_order() {
    let selection = vec![recipe(
        "A",
        Some(vec![
            ingredient("Red Pepper Flakes", "1", "tsp"),
            ingredient("Chili Flakes", "1", "tsp"),
            ingredient("Oregano", "1", "tsp"),
        ]),
    )];
    let list = categorize(aggregate(&selection));

    // "pepper" sits in the produce list, which is checked first.
    let produce: Vec<&str> = list
        .bucket(Category::Produce)
        .iter()
        .map(|l| l.item.as_str())
        .collect();
    assert_eq!(produce, vec!["Red Pepper Flakes"]);

    // "flakes" and "oregano" only match the spice list, checked before
    // pantry.
    let spices: Vec<&str> = list
        .bucket(Category::SpicesSeasonings)
        .iter()
        .map(|l| l.item.as_str())
        .collect();
    assert_eq!(spices, vec!["Chili Flakes", "Oregano"]);
    assert!(list.bucket(Category::Pantry).is_empty());
}

#[test]
fn test_unmatched_item_falls_back_to_other() {
    let selection = vec![recipe("A", Some(vec![ingredient("Sriracha", "1", "tbsp")]))];
    let list = categorize(aggregate(&selection));
    assert_eq!(list.bucket(Category::Other).len(), 1);
    assert_eq!(list.bucket(Category::Other)[0].item, "Sriracha");
}

#[test]
fn test_empty_selection_yields_six_empty_buckets() {
    let list = build_shopping_list(&[]);
    assert!(list.is_empty());
    assert_eq!(list.iter().count(), 6);
    for (_, lines) in list.iter() {
        assert!(lines.is_empty());
    }
}

#[test]
fn test_recipe_without_ingredients_contributes_nothing() {
    let selection = vec![
        recipe("Empty", None),
        recipe("A", Some(vec![ingredient("Garlic", "3", "clove")])),
    ];
    let lines = aggregate(&selection);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].recipes, vec!["A"]);
}

#[test]
fn test_two_recipe_scenario() {
    let selection = vec![
        recipe("A", Some(vec![ingredient("Chicken Breast", "2", "lb")])),
        recipe(
            "B",
            Some(vec![
                ingredient("chicken breast", "1", "lb"),
                ingredient("Garlic", "3", "clove"),
            ]),
        ),
    ];

    let lines = aggregate(&selection);
    assert_eq!(lines.len(), 2);

    let chicken = &lines[0];
    assert_eq!(chicken.key, "chicken breast");
    assert_eq!(chicken.item, "Chicken Breast");
    assert_eq!(chicken.amount, "3");
    assert_eq!(chicken.unit, "lb");
    assert_eq!(chicken.recipes, vec!["A", "B"]);

    let garlic = &lines[1];
    assert_eq!(garlic.key, "garlic");
    assert_eq!(garlic.amount, "3");
    assert_eq!(garlic.unit, "clove");
    assert_eq!(garlic.recipes, vec!["B"]);

    let list = categorize(lines);
    assert_eq!(list.bucket(Category::MeatPoultry).len(), 1);
    assert_eq!(list.bucket(Category::MeatPoultry)[0].item, "Chicken Breast");
    assert_eq!(list.bucket(Category::Produce).len(), 1);
    assert_eq!(list.bucket(Category::Produce)[0].item, "Garlic");
    assert!(list.bucket(Category::DairyEggs).is_empty());
    assert!(list.bucket(Category::Pantry).is_empty());
    assert!(list.bucket(Category::SpicesSeasonings).is_empty());
    assert!(list.bucket(Category::Other).is_empty());
}
