use axum::extract::{Path, State};
use axum::{Extension, Json};
use mealmind_meal::MealInput;
use mealmind_shared::meal::Meal;

use crate::error::ApiResult;
use crate::middleware::Auth;
use crate::routes::AppState;

pub async fn get_meals(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Meal>>> {
    Ok(Json(state.meals.list(&auth.user_id).await?))
}

pub async fn get_meal(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Meal>> {
    let Some(meal) = state.meals.get(&auth.user_id, &id).await? else {
        return Err(mealmind_shared::Error::NotFound("meal".to_owned()).into());
    };

    Ok(Json(meal))
}

pub async fn post_meal(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(input): Json<MealInput>,
) -> ApiResult<Json<Meal>> {
    Ok(Json(state.meals.create(&auth.user_id, input).await?))
}

pub async fn put_meal(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<MealInput>,
) -> ApiResult<Json<Meal>> {
    Ok(Json(state.meals.update(&auth.user_id, &id, input).await?))
}

pub async fn delete_meal(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.meals.delete(&auth.user_id, &id).await?;

    Ok(Json(serde_json::json!({ "deleted": id })))
}
