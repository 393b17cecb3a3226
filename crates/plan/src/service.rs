use chrono::NaiveDate;
use mealmind_meal::MealStore;
use mealmind_settings::SettingsStore;
use mealmind_shared::plan::WeekPlan;
use mealmind_shared::week_start_of;
use sqlx::SqlitePool;

use crate::PlanStore;
use crate::engine;

/// Orchestrates one plan operation per call: read settings and meals, run the
/// pure engine, persist the result. Holds no state between requests; the
/// read-modify-write is last-write-wins by design.
#[derive(Clone)]
pub struct PlanService {
    meals: MealStore,
    settings: SettingsStore,
    plans: PlanStore,
}

impl PlanService {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self {
            meals: MealStore::new(read_db.clone(), write_db.clone()),
            settings: SettingsStore::new(read_db.clone(), write_db.clone()),
            plans: PlanStore::new(read_db, write_db),
        }
    }

    pub async fn get(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<Option<WeekPlan>> {
        self.plans.get(user_id, week_start_of(week_start)).await
    }

    /// Build a fresh plan for the week and overwrite whatever was stored for
    /// it. An empty eligible set is not an error: the week comes back with
    /// all days unplanned.
    pub async fn generate(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<WeekPlan> {
        let week_start = week_start_of(week_start);
        let settings = self.settings.get(user_id).await?;
        let meals = self.meals.list(user_id).await?;

        let plan = {
            let mut rng = rand::rng();
            engine::generate(week_start, &meals, &settings, &mut rng)
        };

        self.plans.upsert(user_id, &plan).await?;

        tracing::debug!(
            user_id,
            week_start = %plan.week_start,
            planned = plan.days.iter().filter(|d| d.meal_id.is_some()).count(),
            "generated week plan"
        );

        Ok(plan)
    }

    /// Re-pick one day. `None` when no plan exists for the week; the plan
    /// comes back unchanged (and unwritten) when no candidate is available.
    pub async fn reroll(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        day: NaiveDate,
    ) -> mealmind_shared::Result<Option<WeekPlan>> {
        let week_start = week_start_of(week_start);
        let Some(mut plan) = self.plans.get(user_id, week_start).await? else {
            return Ok(None);
        };

        let settings = self.settings.get(user_id).await?;
        let meals = self.meals.list(user_id).await?;

        let changed = {
            let mut rng = rand::rng();
            engine::reroll(&mut plan, day, &meals, &settings, &mut rng)
        };
        if changed {
            self.plans.upsert(user_id, &plan).await?;
        }

        Ok(Some(plan))
    }

    pub async fn swap(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        date_a: NaiveDate,
        date_b: NaiveDate,
    ) -> mealmind_shared::Result<Option<WeekPlan>> {
        let week_start = week_start_of(week_start);
        let Some(mut plan) = self.plans.get(user_id, week_start).await? else {
            return Ok(None);
        };

        if engine::swap(&mut plan, date_a, date_b) {
            self.plans.upsert(user_id, &plan).await?;
        }

        Ok(Some(plan))
    }

    /// Manual override, used directly by the planner UI and indirectly by
    /// household request approval. No eligibility or duplicate checks.
    pub async fn set_day_meal(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        day: NaiveDate,
        meal_id: Option<String>,
    ) -> mealmind_shared::Result<Option<WeekPlan>> {
        let week_start = week_start_of(week_start);
        let Some(mut plan) = self.plans.get(user_id, week_start).await? else {
            return Ok(None);
        };

        if engine::set_day_meal(&mut plan, day, meal_id) {
            self.plans.upsert(user_id, &plan).await?;
        }

        Ok(Some(plan))
    }
}
