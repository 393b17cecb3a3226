//! Turns a stored week plan plus the meal library into a deduplicated
//! shopping list. Pure; persistence and the checked flag live in the store.

use mealmind_shared::meal::Meal;
use mealmind_shared::plan::WeekPlan;
use mealmind_shared::shopping::ShoppingItem;
use std::collections::HashSet;

/// One item per distinct ingredient name across every planned day, in
/// first-seen order. Names are keyed lowercased and trimmed, so casing and
/// stray whitespace collapse into one entry; quantities are not aggregated.
/// Days whose meal id no longer resolves are skipped.
pub fn derive(plan: &WeekPlan, meals: &[Meal]) -> Vec<ShoppingItem> {
    let mut seen = HashSet::new();
    let mut items = vec![];

    for day in &plan.days {
        let Some(meal_id) = day.meal_id.as_deref() else {
            continue;
        };
        let Some(meal) = meals.iter().find(|m| m.id == meal_id) else {
            continue;
        };

        for ingredient in &meal.ingredients {
            let key = ingredient.name.to_lowercase().trim().to_owned();
            if seen.insert(key.to_owned()) {
                items.push(ShoppingItem::unchecked(capitalize(&key)));
            }
        }
    }

    items
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mealmind_shared::meal::Ingredient;
    use mealmind_shared::plan::DayPlan;
    use mealmind_shared::week_days;

    fn meal(id: &str, ingredients: &[&str]) -> Meal {
        Meal {
            id: id.to_owned(),
            name: format!("Meal {id}"),
            tags: vec![],
            cook_time_minutes: 30,
            ingredients: ingredients.iter().map(|s| Ingredient::new(*s)).collect(),
        }
    }

    fn plan_with(meal_ids: &[Option<&str>]) -> WeekPlan {
        let week_start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let days = week_days(week_start)
            .iter()
            .enumerate()
            .map(|(i, date)| DayPlan {
                date: *date,
                meal_id: meal_ids.get(i).copied().flatten().map(str::to_owned),
            })
            .collect();

        WeekPlan { week_start, days }
    }

    #[test]
    fn dedups_names_differing_only_by_case_and_whitespace() {
        let meals = vec![
            meal("a", &["Olive Oil", "garlic"]),
            meal("b", &["  olive oil ", "Onion"]),
        ];
        let plan = plan_with(&[Some("a"), Some("b")]);

        let items = derive(&plan, &meals);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Olive oil", "Garlic", "Onion"]);
        assert!(items.iter().all(|i| !i.checked));
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let meals = vec![meal("a", &["rice", "beans"]), meal("b", &["beans", "lime"])];
        let plan = plan_with(&[Some("a"), Some("b")]);

        let names: Vec<String> = derive(&plan, &meals).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Rice", "Beans", "Lime"]);
    }

    #[test]
    fn skips_off_days_and_dangling_meal_ids() {
        let meals = vec![meal("a", &["rice"])];
        let plan = plan_with(&[Some("a"), None, Some("deleted-meal")]);

        let items = derive(&plan, &meals);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Rice");
    }

    #[test]
    fn empty_plan_derives_an_empty_list() {
        let items = derive(&plan_with(&[]), &[meal("a", &["rice"])]);
        assert!(items.is_empty());
    }
}
