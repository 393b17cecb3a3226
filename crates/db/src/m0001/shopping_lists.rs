use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::ShoppingLists;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingLists::Table)
        .col(ColumnDef::new(ShoppingLists::UserId).string().not_null())
        .col(ColumnDef::new(ShoppingLists::WeekStart).string().not_null())
        .col(ColumnDef::new(ShoppingLists::Items).text().not_null())
        .col(ColumnDef::new(ShoppingLists::UpdatedAt).string().not_null())
        .primary_key(
            Index::create()
                .col(ShoppingLists::UserId)
                .col(ShoppingLists::WeekStart),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingLists::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

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
