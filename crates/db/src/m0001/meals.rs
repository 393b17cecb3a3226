use sea_query::{
    ColumnDef, Index, IndexCreateStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::Meals;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Meals::Table)
        .col(
            ColumnDef::new(Meals::Id)
                .string()
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Meals::UserId).string().not_null())
        .col(ColumnDef::new(Meals::Name).string().not_null())
        .col(ColumnDef::new(Meals::Tags).text().not_null())
        .col(ColumnDef::new(Meals::CookTimeMinutes).integer().not_null())
        .col(ColumnDef::new(Meals::Ingredients).text().not_null())
        .col(ColumnDef::new(Meals::CreatedAt).string().not_null())
        .to_owned()
}

fn create_user_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_meals_user_id")
        .table(Meals::Table)
        .col(Meals::UserId)
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Meals::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        let statement = create_user_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
