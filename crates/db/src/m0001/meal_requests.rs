use sea_query::{
    ColumnDef, Index, IndexCreateStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::MealRequests;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(MealRequests::Table)
        .col(
            ColumnDef::new(MealRequests::Id)
                .string()
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(MealRequests::HouseholdId)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(MealRequests::RequestedBy)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(MealRequests::MealId).string().not_null())
        .col(ColumnDef::new(MealRequests::Date).string().not_null())
        .col(ColumnDef::new(MealRequests::Status).string().not_null())
        .col(ColumnDef::new(MealRequests::CreatedAt).string().not_null())
        .to_owned()
}

fn create_household_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_meal_requests_household_id")
        .table(MealRequests::Table)
        .col(MealRequests::HouseholdId)
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(MealRequests::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        let statement = create_household_idx().to_string(sea_query::SqliteQueryBuilder);
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
