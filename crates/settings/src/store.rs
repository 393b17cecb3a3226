use chrono::Utc;
use mealmind_db::table::UserSettings;
use mealmind_shared::settings::Settings;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInput {
    #[validate(range(min = 1, max = 7, message = "Dinners per week must be between 1 and 7"))]
    pub dinners_per_week: u8,
    #[validate(range(min = 1, message = "Max cook time must be at least 1 minute"))]
    pub max_cook_time_minutes: u32,
    #[serde(default)]
    pub excluded_ingredients: Vec<String>,
    pub allow_repeats: bool,
}

#[derive(FromRow)]
struct SettingsRow {
    dinners_per_week: i64,
    max_cook_time_minutes: i64,
    excluded_ingredients: String,
    allow_repeats: bool,
}

/// Per-user planning preferences, one row per user. Reads fall back to the
/// defaults when the user never saved anything.
#[derive(Clone)]
pub struct SettingsStore {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl SettingsStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    pub async fn get(&self, user_id: &str) -> mealmind_shared::Result<Settings> {
        let statement = Query::select()
            .columns([
                UserSettings::DinnersPerWeek,
                UserSettings::MaxCookTimeMinutes,
                UserSettings::ExcludedIngredients,
                UserSettings::AllowRepeats,
            ])
            .from(UserSettings::Table)
            .and_where(Expr::col(UserSettings::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, SettingsRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        let Some(row) = row else {
            return Ok(Settings::default());
        };

        Ok(Settings {
            dinners_per_week: row.dinners_per_week as u8,
            max_cook_time_minutes: row.max_cook_time_minutes as u32,
            excluded_ingredients: serde_json::from_str(&row.excluded_ingredients)?,
            allow_repeats: row.allow_repeats,
        })
    }

    pub async fn save(
        &self,
        user_id: &str,
        input: SettingsInput,
    ) -> mealmind_shared::Result<Settings> {
        input.validate()?;

        // Empty exclusion strings would match every ingredient name via the
        // substring rule; drop them at the door.
        let excluded_ingredients: Vec<String> = input
            .excluded_ingredients
            .iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();

        let settings = Settings {
            dinners_per_week: input.dinners_per_week,
            max_cook_time_minutes: input.max_cook_time_minutes,
            excluded_ingredients,
            allow_repeats: input.allow_repeats,
        };

        let statement = Query::insert()
            .into_table(UserSettings::Table)
            .columns([
                UserSettings::UserId,
                UserSettings::DinnersPerWeek,
                UserSettings::MaxCookTimeMinutes,
                UserSettings::ExcludedIngredients,
                UserSettings::AllowRepeats,
                UserSettings::UpdatedAt,
            ])
            .values_panic([
                user_id.to_owned().into(),
                settings.dinners_per_week.into(),
                settings.max_cook_time_minutes.into(),
                serde_json::to_string(&settings.excluded_ingredients)?.into(),
                settings.allow_repeats.into(),
                Utc::now().to_rfc3339().into(),
            ])
            .on_conflict(
                OnConflict::column(UserSettings::UserId)
                    .update_columns([
                        UserSettings::DinnersPerWeek,
                        UserSettings::MaxCookTimeMinutes,
                        UserSettings::ExcludedIngredients,
                        UserSettings::AllowRepeats,
                        UserSettings::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(settings)
    }
}
