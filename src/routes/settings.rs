use axum::extract::State;
use axum::{Extension, Json};
use mealmind_settings::SettingsInput;
use mealmind_shared::settings::Settings;

use crate::error::ApiResult;
use crate::middleware::Auth;
use crate::routes::AppState;

pub async fn get_settings(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings.get(&auth.user_id).await?))
}

pub async fn put_settings(
    Extension(auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(input): Json<SettingsInput>,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings.save(&auth.user_id, input).await?))
}
