use chrono::Utc;
use mealmind_db::table::Meals;
use mealmind_shared::meal::{Ingredient, Meal};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(range(min = 1, message = "Cook time must be at least 1 minute"))]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl MealInput {
    fn check(&self) -> mealmind_shared::Result<()> {
        self.validate()?;

        if self.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            mealmind_shared::user!("Ingredient names must not be empty");
        }

        Ok(())
    }
}

#[derive(FromRow)]
struct MealRow {
    id: String,
    name: String,
    tags: String,
    cook_time_minutes: i64,
    ingredients: String,
}

impl TryFrom<MealRow> for Meal {
    type Error = mealmind_shared::Error;

    fn try_from(row: MealRow) -> mealmind_shared::Result<Meal> {
        Ok(Meal {
            id: row.id,
            name: row.name,
            tags: serde_json::from_str(&row.tags)?,
            cook_time_minutes: row.cook_time_minutes as u32,
            ingredients: serde_json::from_str(&row.ingredients)?,
        })
    }
}

/// Meal library CRUD, scoped by owning user. Deleting a meal leaves any plan
/// references dangling on purpose; consuming views skip unresolvable ids.
#[derive(Clone)]
pub struct MealStore {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl MealStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    pub async fn list(&self, user_id: &str) -> mealmind_shared::Result<Vec<Meal>> {
        let statement = Query::select()
            .columns([
                Meals::Id,
                Meals::Name,
                Meals::Tags,
                Meals::CookTimeMinutes,
                Meals::Ingredients,
            ])
            .from(Meals::Table)
            .and_where(Expr::col(Meals::UserId).eq(user_id))
            .order_by(Meals::CreatedAt, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(Meal::try_from).collect()
    }

    pub async fn get(&self, user_id: &str, id: &str) -> mealmind_shared::Result<Option<Meal>> {
        let statement = Query::select()
            .columns([
                Meals::Id,
                Meals::Name,
                Meals::Tags,
                Meals::CookTimeMinutes,
                Meals::Ingredients,
            ])
            .from(Meals::Table)
            .and_where(Expr::col(Meals::UserId).eq(user_id))
            .and_where(Expr::col(Meals::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        row.map(Meal::try_from).transpose()
    }

    pub async fn create(&self, user_id: &str, input: MealInput) -> mealmind_shared::Result<Meal> {
        input.check()?;

        let meal = Meal {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            tags: input.tags,
            cook_time_minutes: input.cook_time_minutes,
            ingredients: input.ingredients,
        };

        let statement = Query::insert()
            .into_table(Meals::Table)
            .columns([
                Meals::Id,
                Meals::UserId,
                Meals::Name,
                Meals::Tags,
                Meals::CookTimeMinutes,
                Meals::Ingredients,
                Meals::CreatedAt,
            ])
            .values_panic([
                meal.id.to_owned().into(),
                user_id.to_owned().into(),
                meal.name.to_owned().into(),
                serde_json::to_string(&meal.tags)?.into(),
                meal.cook_time_minutes.into(),
                serde_json::to_string(&meal.ingredients)?.into(),
                Utc::now().to_rfc3339().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(meal)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: MealInput,
    ) -> mealmind_shared::Result<Meal> {
        input.check()?;

        let statement = Query::update()
            .table(Meals::Table)
            .value(Meals::Name, input.name.to_owned())
            .value(Meals::Tags, serde_json::to_string(&input.tags)?)
            .value(Meals::CookTimeMinutes, input.cook_time_minutes)
            .value(Meals::Ingredients, serde_json::to_string(&input.ingredients)?)
            .and_where(Expr::col(Meals::UserId).eq(user_id))
            .and_where(Expr::col(Meals::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            mealmind_shared::not_found!("meal");
        }

        Ok(Meal {
            id: id.to_owned(),
            name: input.name,
            tags: input.tags,
            cook_time_minutes: input.cook_time_minutes,
            ingredients: input.ingredients,
        })
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> mealmind_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Meals::Table)
            .and_where(Expr::col(Meals::UserId).eq(user_id))
            .and_where(Expr::col(Meals::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            mealmind_shared::not_found!("meal");
        }

        Ok(())
    }
}
