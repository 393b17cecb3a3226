use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::UserSettings;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(UserSettings::Table)
        .col(
            ColumnDef::new(UserSettings::UserId)
                .string()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(UserSettings::DinnersPerWeek)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(UserSettings::MaxCookTimeMinutes)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(UserSettings::ExcludedIngredients)
                .text()
                .not_null(),
        )
        .col(
            ColumnDef::new(UserSettings::AllowRepeats)
                .boolean()
                .not_null(),
        )
        .col(ColumnDef::new(UserSettings::UpdatedAt).string().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(UserSettings::Table).to_owned()
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
