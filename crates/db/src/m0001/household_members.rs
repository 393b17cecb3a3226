use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::HouseholdMembers;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(HouseholdMembers::Table)
        .col(
            ColumnDef::new(HouseholdMembers::HouseholdId)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(HouseholdMembers::UserId).string().not_null())
        .col(
            ColumnDef::new(HouseholdMembers::DisplayName)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(HouseholdMembers::Role).string().not_null())
        .col(
            ColumnDef::new(HouseholdMembers::CreatedAt)
                .string()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(HouseholdMembers::HouseholdId)
                .col(HouseholdMembers::UserId),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(HouseholdMembers::Table).to_owned()
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
