use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::NaiveDate;
use mealmind_shared::shopping::ShoppingItem;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::middleware::Auth;
use crate::routes::AppState;
use crate::routes::planner::WeekQuery;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateShoppingListRequest {
    pub week_start: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleShoppingItemRequest {
    pub week_start: NaiveDate,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetShoppingListRequest {
    pub week_start: NaiveDate,
}

pub async fn get_shopping_list(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<Vec<ShoppingItem>>> {
    Ok(Json(state.shopping.list(&auth.user_id, query.week()).await?))
}

pub async fn post_generate_shopping_list(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<GenerateShoppingListRequest>,
) -> ApiResult<Json<Vec<ShoppingItem>>> {
    Ok(Json(
        state
            .shopping
            .generate(&auth.user_id, request.week_start)
            .await?,
    ))
}

pub async fn post_toggle_shopping_item(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<ToggleShoppingItemRequest>,
) -> ApiResult<Json<Vec<ShoppingItem>>> {
    Ok(Json(
        state
            .shopping
            .toggle(&auth.user_id, request.week_start, &request.name)
            .await?,
    ))
}

pub async fn post_reset_shopping_list(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<ResetShoppingListRequest>,
) -> ApiResult<Json<Vec<ShoppingItem>>> {
    Ok(Json(
        state
            .shopping
            .reset(&auth.user_id, request.week_start)
            .await?,
    ))
}
