use axum::extract::{Path, State};
use axum::{Extension, Json};
use mealmind_household::{CreateHouseholdInput, JoinHouseholdInput, MealRequestInput};
use mealmind_shared::household::{Household, HouseholdMember, MealRequest};

use crate::error::ApiResult;
use crate::middleware::Auth;
use crate::routes::AppState;

pub async fn post_household(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(input): Json<CreateHouseholdInput>,
) -> ApiResult<Json<Household>> {
    Ok(Json(state.households.create(&auth.user_id, input).await?))
}

pub async fn post_join_household(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(input): Json<JoinHouseholdInput>,
) -> ApiResult<Json<Household>> {
    Ok(Json(state.households.join(&auth.user_id, input).await?))
}

pub async fn get_household_members(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<HouseholdMember>>> {
    Ok(Json(state.households.members(&auth.user_id, &id).await?))
}

pub async fn get_household_requests(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<MealRequest>>> {
    Ok(Json(state.households.requests(&auth.user_id, &id).await?))
}

pub async fn post_meal_request(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(input): Json<MealRequestInput>,
) -> ApiResult<Json<MealRequest>> {
    Ok(Json(state.households.request(&auth.user_id, input).await?))
}

pub async fn post_approve_request(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MealRequest>> {
    Ok(Json(state.households.approve(&auth.user_id, &id).await?))
}

pub async fn post_decline_request(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MealRequest>> {
    Ok(Json(state.households.decline(&auth.user_id, &id).await?))
}
