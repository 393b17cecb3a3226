use axum::extract::State;
use axum::{Extension, Json};
use mealmind_import::{ImportError, ParsedRecipe};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Deserialize)]
pub struct ImportRecipeRequest {
    pub url: String,
}

/// Fetch and parse a recipe URL. The response feeds the meal form; nothing
/// is persisted until the user saves the meal.
pub async fn post_import_recipe(
    Extension(_auth): Extension<Auth>,
    State(state): State<AppState>,
    Json(request): Json<ImportRecipeRequest>,
) -> ApiResult<Json<ParsedRecipe>> {
    let recipe = state
        .importer
        .import(&request.url)
        .await
        .map_err(import_error)?;

    Ok(Json(recipe))
}

fn import_error(error: ImportError) -> crate::error::AppError {
    let message = match &error {
        ImportError::InvalidUrl(_) | ImportError::UnsupportedScheme => {
            "A valid http(s) recipe URL is required".to_owned()
        }
        ImportError::Request(_) | ImportError::Status(_) => {
            tracing::warn!("recipe fetch failed: {error}");
            "Failed to fetch recipe page".to_owned()
        }
        ImportError::Parse(_) => {
            "Could not parse recipe from this page. Try a different recipe site.".to_owned()
        }
    };

    mealmind_shared::Error::User(message).into()
}
