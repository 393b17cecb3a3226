use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of a week plan. `meal_id == None` means "no meal planned
/// / leftovers". A non-null id is not guaranteed to resolve against the meal
/// library; consuming views treat a dangling id as "no meal".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: NaiveDate,
    pub meal_id: Option<String>,
}

/// A user's plan for one week, keyed by `(user, week_start)`. Always exactly
/// 7 days, Monday through Sunday, date-aligned to `week_start`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    pub week_start: NaiveDate,
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    pub fn day(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DayPlan> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    pub fn contains_day(&self, date: NaiveDate) -> bool {
        self.day(date).is_some()
    }
}
