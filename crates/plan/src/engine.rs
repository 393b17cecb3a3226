//! Week plan decision logic. Everything here is pure: callers hand in the
//! meal set, the current settings and a random source, and get back a plan or
//! an in-place mutation. Persistence lives in [`crate::PlanStore`].

use chrono::NaiveDate;
use mealmind_shared::meal::Meal;
use mealmind_shared::plan::{DayPlan, WeekPlan};
use mealmind_shared::settings::Settings;
use mealmind_shared::week_days;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::HashSet;

/// A meal qualifies for automatic placement when it fits the cook-time
/// ceiling and none of its ingredient names contain an excluded string
/// (case-insensitive substring match). Evaluated against the settings active
/// at call time, never cached with the plan.
pub fn is_eligible(meal: &Meal, settings: &Settings) -> bool {
    if meal.cook_time_minutes > settings.max_cook_time_minutes {
        return false;
    }

    !meal.ingredients.iter().any(|ingredient| {
        let name = ingredient.name.to_lowercase();
        settings
            .excluded_ingredients
            .iter()
            .any(|excluded| name.contains(&excluded.to_lowercase()))
    })
}

pub fn eligible_meals<'a>(meals: &'a [Meal], settings: &Settings) -> Vec<&'a Meal> {
    meals.iter().filter(|m| is_eligible(m, settings)).collect()
}

/// Pick the meal ids for a fresh week, at most `dinners_per_week` of them.
///
/// With repeats allowed every slot is an independent uniform draw. Without
/// repeats the eligible set is shuffled once and consumed, stopping early
/// when it runs dry.
pub fn select_meal_ids(
    eligible: &[&Meal],
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<String> {
    let slots = usize::from(settings.dinners_per_week).min(7);
    if eligible.is_empty() {
        return vec![];
    }

    if settings.allow_repeats {
        (0..slots)
            .filter_map(|_| eligible.choose(rng).map(|m| m.id.to_owned()))
            .collect()
    } else {
        let mut pool = eligible.to_vec();
        pool.shuffle(rng);
        pool.into_iter()
            .take(slots)
            .map(|m| m.id.to_owned())
            .collect()
    }
}

/// Lay the selected ids over the week in order. The first ids land on the
/// first days; days past the selection stay unplanned (off/leftover days at
/// the tail of the week).
pub fn build_week(week_start: NaiveDate, meal_ids: &[String]) -> WeekPlan {
    let days = week_days(week_start)
        .iter()
        .enumerate()
        .map(|(i, date)| DayPlan {
            date: *date,
            meal_id: meal_ids.get(i).cloned(),
        })
        .collect();

    WeekPlan {
        week_start,
        days,
    }
}

pub fn generate(
    week_start: NaiveDate,
    meals: &[Meal],
    settings: &Settings,
    rng: &mut impl Rng,
) -> WeekPlan {
    let eligible = eligible_meals(meals, settings);
    let meal_ids = select_meal_ids(&eligible, settings, rng);
    build_week(week_start, &meal_ids)
}

/// Replace one day's meal with a fresh random eligible pick. Meals already
/// placed on *other* days are off limits when repeats are disallowed; the
/// day's own current meal stays in the pool, so a reroll may land on it
/// again. Returns whether the plan was mutated.
pub fn reroll(
    plan: &mut WeekPlan,
    day: NaiveDate,
    meals: &[Meal],
    settings: &Settings,
    rng: &mut impl Rng,
) -> bool {
    if !plan.contains_day(day) {
        return false;
    }

    let used: HashSet<&str> = plan
        .days
        .iter()
        .filter(|d| d.date != day)
        .filter_map(|d| d.meal_id.as_deref())
        .collect();

    let candidates: Vec<&Meal> = eligible_meals(meals, settings)
        .into_iter()
        .filter(|m| settings.allow_repeats || !used.contains(m.id.as_str()))
        .collect();

    let Some(pick) = candidates.choose(rng) else {
        return false;
    };

    if let Some(d) = plan.day_mut(day) {
        d.meal_id = Some(pick.id.to_owned());
    }

    true
}

/// Exchange two days' meal ids. Swapping against an off day is valid: the
/// meal moves and the other day becomes off. No eligibility re-check, a swap
/// never introduces a meal that was not already in the plan.
pub fn swap(plan: &mut WeekPlan, a: NaiveDate, b: NaiveDate) -> bool {
    if !plan.contains_day(a) || !plan.contains_day(b) {
        return false;
    }

    let meal_a = plan.day(a).and_then(|d| d.meal_id.to_owned());
    let meal_b = plan.day(b).and_then(|d| d.meal_id.to_owned());

    if let Some(d) = plan.day_mut(a) {
        d.meal_id = meal_b;
    }
    if let Some(d) = plan.day_mut(b) {
        d.meal_id = meal_a;
    }

    true
}

/// Manual override: set the day's meal unconditionally, bypassing the
/// eligibility filter and the duplicate check.
pub fn set_day_meal(plan: &mut WeekPlan, day: NaiveDate, meal_id: Option<String>) -> bool {
    match plan.day_mut(day) {
        Some(d) => {
            d.meal_id = meal_id;
            true
        }
        None => false,
    }
}
