use sea_query::{
    ColumnDef, Index, IndexCreateStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::Households;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Households::Table)
        .col(
            ColumnDef::new(Households::Id)
                .string()
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Households::Name).string().not_null())
        .col(ColumnDef::new(Households::InviteCode).string().not_null())
        .col(ColumnDef::new(Households::OwnerId).string().not_null())
        .col(ColumnDef::new(Households::CreatedAt).string().not_null())
        .to_owned()
}

fn create_invite_code_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_households_invite_code")
        .table(Households::Table)
        .col(Households::InviteCode)
        .unique()
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Households::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        let statement = create_invite_code_idx().to_string(sea_query::SqliteQueryBuilder);
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
