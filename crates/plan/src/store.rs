use chrono::{NaiveDate, Utc};
use mealmind_db::table::WeekPlans;
use mealmind_shared::format_date;
use mealmind_shared::plan::WeekPlan;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
struct PlanRow {
    days: String,
}

/// Week plans keyed by `(user, week_start)`, at most one per user per week.
/// The whole plan is written on every mutation; last write wins.
#[derive(Clone)]
pub struct PlanStore {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl PlanStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    pub async fn get(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<Option<WeekPlan>> {
        let statement = Query::select()
            .columns([WeekPlans::Days])
            .from(WeekPlans::Table)
            .and_where(Expr::col(WeekPlans::UserId).eq(user_id))
            .and_where(Expr::col(WeekPlans::WeekStart).eq(format_date(week_start)))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(WeekPlan {
            week_start,
            days: serde_json::from_str(&row.days)?,
        }))
    }

    pub async fn upsert(&self, user_id: &str, plan: &WeekPlan) -> mealmind_shared::Result<()> {
        let statement = Query::insert()
            .into_table(WeekPlans::Table)
            .columns([
                WeekPlans::UserId,
                WeekPlans::WeekStart,
                WeekPlans::Days,
                WeekPlans::UpdatedAt,
            ])
            .values_panic([
                user_id.to_owned().into(),
                format_date(plan.week_start).into(),
                serde_json::to_string(&plan.days)?.into(),
                Utc::now().to_rfc3339().into(),
            ])
            .on_conflict(
                OnConflict::columns([WeekPlans::UserId, WeekPlans::WeekStart])
                    .update_columns([WeekPlans::Days, WeekPlans::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}
