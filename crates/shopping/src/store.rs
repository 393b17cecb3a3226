use chrono::{NaiveDate, Utc};
use mealmind_db::table::ShoppingLists;
use mealmind_shared::format_date;
use mealmind_shared::shopping::ShoppingItem;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
struct ListRow {
    items: String,
}

/// Persisted shopping list per `(user, week_start)`. The item set comes from
/// the deriver; only the checked flags are user-authored.
#[derive(Clone)]
pub struct ShoppingListStore {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl ShoppingListStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    pub async fn get(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> mealmind_shared::Result<Option<Vec<ShoppingItem>>> {
        let statement = Query::select()
            .columns([ShoppingLists::Items])
            .from(ShoppingLists::Table)
            .and_where(Expr::col(ShoppingLists::UserId).eq(user_id))
            .and_where(Expr::col(ShoppingLists::WeekStart).eq(format_date(week_start)))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, ListRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&row.items)?))
    }

    /// Full overwrite; a regeneration replaces previously checked state.
    pub async fn save(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        items: &[ShoppingItem],
    ) -> mealmind_shared::Result<()> {
        let statement = Query::insert()
            .into_table(ShoppingLists::Table)
            .columns([
                ShoppingLists::UserId,
                ShoppingLists::WeekStart,
                ShoppingLists::Items,
                ShoppingLists::UpdatedAt,
            ])
            .values_panic([
                user_id.to_owned().into(),
                format_date(week_start).into(),
                serde_json::to_string(items)?.into(),
                Utc::now().to_rfc3339().into(),
            ])
            .on_conflict(
                OnConflict::columns([ShoppingLists::UserId, ShoppingLists::WeekStart])
                    .update_columns([ShoppingLists::Items, ShoppingLists::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}
