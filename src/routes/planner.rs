use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use mealmind_shared::plan::WeekPlan;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Deserialize)]
pub struct WeekQuery {
    /// Any date inside the wanted week; defaults to today. Normalized to the
    /// week's Monday before lookup.
    week: Option<NaiveDate>,
}

impl WeekQuery {
    pub(crate) fn week(&self) -> NaiveDate {
        self.week.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub week_start: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerollDayRequest {
    pub week_start: NaiveDate,
    pub date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDaysRequest {
    pub week_start: NaiveDate,
    pub date_a: NaiveDate,
    pub date_b: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDayMealRequest {
    pub week_start: NaiveDate,
    pub date: NaiveDate,
    pub meal_id: Option<String>,
}

fn plan_or_not_found(plan: Option<WeekPlan>) -> ApiResult<Json<WeekPlan>> {
    match plan {
        Some(plan) => Ok(Json(plan)),
        None => Err(mealmind_shared::Error::NotFound("plan".to_owned()).into()),
    }
}

pub async fn get_plan(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<WeekPlan>> {
    plan_or_not_found(state.plans.get(&auth.user_id, query.week()).await?)
}

pub async fn post_generate_plan(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<GeneratePlanRequest>,
) -> ApiResult<Json<WeekPlan>> {
    Ok(Json(
        state.plans.generate(&auth.user_id, request.week_start).await?,
    ))
}

pub async fn post_reroll_day(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<RerollDayRequest>,
) -> ApiResult<Json<WeekPlan>> {
    plan_or_not_found(
        state
            .plans
            .reroll(&auth.user_id, request.week_start, request.date)
            .await?,
    )
}

pub async fn post_swap_days(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<SwapDaysRequest>,
) -> ApiResult<Json<WeekPlan>> {
    plan_or_not_found(
        state
            .plans
            .swap(&auth.user_id, request.week_start, request.date_a, request.date_b)
            .await?,
    )
}

pub async fn post_set_day_meal(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<SetDayMealRequest>,
) -> ApiResult<Json<WeekPlan>> {
    plan_or_not_found(
        state
            .plans
            .set_day_meal(&auth.user_id, request.week_start, request.date, request.meal_id)
            .await?,
    )
}
