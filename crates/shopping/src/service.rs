use chrono::NaiveDate;
use mealmind_meal::MealStore;
use mealmind_plan::PlanStore;
use mealmind_shared::shopping::ShoppingItem;
use mealmind_shared::week_start_of;
use sqlx::SqlitePool;

use crate::ShoppingListStore;
use crate::deriver;

#[derive(Clone)]
pub struct ShoppingService {
    plans: PlanStore,
    meals: MealStore,
    lists: ShoppingListStore,
}

impl ShoppingService {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self {
            plans: PlanStore::new(read_db.clone(), write_db.clone()),
            meals: MealStore::new(read_db.clone(), write_db.clone()),
            lists: ShoppingListStore::new(read_db, write_db),
        }
    }

    /// Derive the week's list from the stored plan and overwrite whatever
    /// list was saved before. No plan for the week means an empty list, and
    /// nothing is written.
    pub async fn generate(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<Vec<ShoppingItem>> {
        let week_start = week_start_of(week_start);
        let Some(plan) = self.plans.get(user_id, week_start).await? else {
            return Ok(vec![]);
        };

        let meals = self.meals.list(user_id).await?;
        let items = deriver::derive(&plan, &meals);
        self.lists.save(user_id, week_start, &items).await?;

        Ok(items)
    }

    /// The stored list for the week, empty when none has been generated.
    pub async fn list(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<Vec<ShoppingItem>> {
        Ok(self
            .lists
            .get(user_id, week_start_of(week_start))
            .await?
            .unwrap_or_default())
    }

    /// Flip one item's checked flag.
    pub async fn toggle(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        name: &str,
    ) -> mealmind_shared::Result<Vec<ShoppingItem>> {
        let week_start = week_start_of(week_start);
        let Some(mut items) = self.lists.get(user_id, week_start).await? else {
            mealmind_shared::not_found!("shopping list");
        };

        let Some(item) = items.iter_mut().find(|i| i.name == name) else {
            mealmind_shared::not_found!("shopping item");
        };
        item.checked = !item.checked;

        self.lists.save(user_id, week_start, &items).await?;

        Ok(items)
    }

    /// Uncheck everything, keeping the item set.
    pub async fn reset(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<Vec<ShoppingItem>> {
        let week_start = week_start_of(week_start);
        let Some(mut items) = self.lists.get(user_id, week_start).await? else {
            mealmind_shared::not_found!("shopping list");
        };

        for item in &mut items {
            item.checked = false;
        }

        self.lists.save(user_id, week_start, &items).await?;

        Ok(items)
    }
}
