use chrono::Utc;
use mealmind_db::table::{HouseholdMembers, Households, MealRequests};
use mealmind_shared::format_date;
use mealmind_shared::household::{
    Household, HouseholdMember, MealRequest, MemberRole, RequestStatus,
};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
struct HouseholdRow {
    id: String,
    name: String,
    invite_code: String,
    owner_id: String,
}

impl From<HouseholdRow> for Household {
    fn from(row: HouseholdRow) -> Self {
        Household {
            id: row.id,
            name: row.name,
            invite_code: row.invite_code,
            owner_id: row.owner_id,
        }
    }
}

#[derive(FromRow)]
struct MemberRow {
    household_id: String,
    user_id: String,
    display_name: String,
    role: String,
}

impl TryFrom<MemberRow> for HouseholdMember {
    type Error = mealmind_shared::Error;

    fn try_from(row: MemberRow) -> mealmind_shared::Result<HouseholdMember> {
        let role: MemberRole = row
            .role
            .parse()
            .map_err(|e: strum::ParseError| mealmind_shared::Error::Server(e.to_string()))?;

        Ok(HouseholdMember {
            household_id: row.household_id,
            user_id: row.user_id,
            display_name: row.display_name,
            role,
        })
    }
}

#[derive(FromRow)]
struct RequestRow {
    id: String,
    household_id: String,
    requested_by: String,
    meal_id: String,
    date: String,
    status: String,
}

impl TryFrom<RequestRow> for MealRequest {
    type Error = mealmind_shared::Error;

    fn try_from(row: RequestRow) -> mealmind_shared::Result<MealRequest> {
        let status: RequestStatus = row
            .status
            .parse()
            .map_err(|e: strum::ParseError| mealmind_shared::Error::Server(e.to_string()))?;
        let Some(date) = mealmind_shared::parse_date(&row.date) else {
            return Err(mealmind_shared::Error::Server(format!(
                "invalid request date {}",
                row.date
            )));
        };

        Ok(MealRequest {
            id: row.id,
            household_id: row.household_id,
            requested_by: row.requested_by,
            meal_id: row.meal_id,
            date,
            status,
        })
    }
}

#[derive(Clone)]
pub struct HouseholdStore {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl HouseholdStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    pub async fn insert_household(
        &self,
        household: &Household,
    ) -> mealmind_shared::Result<()> {
        let statement = Query::insert()
            .into_table(Households::Table)
            .columns([
                Households::Id,
                Households::Name,
                Households::InviteCode,
                Households::OwnerId,
                Households::CreatedAt,
            ])
            .values_panic([
                household.id.to_owned().into(),
                household.name.to_owned().into(),
                household.invite_code.to_owned().into(),
                household.owner_id.to_owned().into(),
                Utc::now().to_rfc3339().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn delete_household(&self, id: &str) -> mealmind_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Households::Table)
            .and_where(Expr::col(Households::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn get_by_invite_code(
        &self,
        invite_code: &str,
    ) -> mealmind_shared::Result<Option<Household>> {
        let statement = Query::select()
            .columns([
                Households::Id,
                Households::Name,
                Households::InviteCode,
                Households::OwnerId,
            ])
            .from(Households::Table)
            .and_where(Expr::col(Households::InviteCode).eq(invite_code))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, HouseholdRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(Household::from))
    }

    /// Idempotent on the `(household, user)` key, so re-joining with the same
    /// invite code is harmless.
    pub async fn insert_member(
        &self,
        member: &HouseholdMember,
    ) -> mealmind_shared::Result<()> {
        let statement = Query::insert()
            .into_table(HouseholdMembers::Table)
            .columns([
                HouseholdMembers::HouseholdId,
                HouseholdMembers::UserId,
                HouseholdMembers::DisplayName,
                HouseholdMembers::Role,
                HouseholdMembers::CreatedAt,
            ])
            .values_panic([
                member.household_id.to_owned().into(),
                member.user_id.to_owned().into(),
                member.display_name.to_owned().into(),
                member.role.to_string().into(),
                Utc::now().to_rfc3339().into(),
            ])
            .on_conflict(
                OnConflict::columns([HouseholdMembers::HouseholdId, HouseholdMembers::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn list_members(
        &self,
        household_id: &str,
    ) -> mealmind_shared::Result<Vec<HouseholdMember>> {
        let statement = Query::select()
            .columns([
                HouseholdMembers::HouseholdId,
                HouseholdMembers::UserId,
                HouseholdMembers::DisplayName,
                HouseholdMembers::Role,
            ])
            .from(HouseholdMembers::Table)
            .and_where(Expr::col(HouseholdMembers::HouseholdId).eq(household_id))
            .order_by(HouseholdMembers::CreatedAt, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, MemberRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(HouseholdMember::try_from).collect()
    }

    pub async fn is_member(
        &self,
        household_id: &str,
        user_id: &str,
    ) -> mealmind_shared::Result<bool> {
        let statement = Query::select()
            .columns([HouseholdMembers::UserId])
            .from(HouseholdMembers::Table)
            .and_where(Expr::col(HouseholdMembers::HouseholdId).eq(household_id))
            .and_where(Expr::col(HouseholdMembers::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.is_some())
    }

    pub async fn insert_request(&self, request: &MealRequest) -> mealmind_shared::Result<()> {
        let statement = Query::insert()
            .into_table(MealRequests::Table)
            .columns([
                MealRequests::Id,
                MealRequests::HouseholdId,
                MealRequests::RequestedBy,
                MealRequests::MealId,
                MealRequests::Date,
                MealRequests::Status,
                MealRequests::CreatedAt,
            ])
            .values_panic([
                request.id.to_owned().into(),
                request.household_id.to_owned().into(),
                request.requested_by.to_owned().into(),
                request.meal_id.to_owned().into(),
                format_date(request.date).into(),
                request.status.to_string().into(),
                Utc::now().to_rfc3339().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn get_request(&self, id: &str) -> mealmind_shared::Result<Option<MealRequest>> {
        let statement = Query::select()
            .columns([
                MealRequests::Id,
                MealRequests::HouseholdId,
                MealRequests::RequestedBy,
                MealRequests::MealId,
                MealRequests::Date,
                MealRequests::Status,
            ])
            .from(MealRequests::Table)
            .and_where(Expr::col(MealRequests::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, RequestRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        row.map(MealRequest::try_from).transpose()
    }

    pub async fn list_requests(
        &self,
        household_id: &str,
    ) -> mealmind_shared::Result<Vec<MealRequest>> {
        let statement = Query::select()
            .columns([
                MealRequests::Id,
                MealRequests::HouseholdId,
                MealRequests::RequestedBy,
                MealRequests::MealId,
                MealRequests::Date,
                MealRequests::Status,
            ])
            .from(MealRequests::Table)
            .and_where(Expr::col(MealRequests::HouseholdId).eq(household_id))
            .order_by(MealRequests::CreatedAt, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RequestRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(MealRequest::try_from).collect()
    }

    pub async fn set_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> mealmind_shared::Result<()> {
        let statement = Query::update()
            .table(MealRequests::Table)
            .value(MealRequests::Status, status.to_string())
            .and_where(Expr::col(MealRequests::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            mealmind_shared::not_found!("meal request");
        }

        Ok(())
    }
}
