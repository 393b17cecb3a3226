mod health;
mod households;
mod import;
mod meals;
mod planner;
mod settings;
mod shopping;

pub use health::*;
pub use households::*;
pub use import::*;
pub use meals::*;
pub use planner::*;
pub use settings::*;
pub use shopping::*;

use axum::Router;
use axum::routing::{get, post};
use mealmind_household::HouseholdService;
use mealmind_import::RecipeImporter;
use mealmind_meal::MealStore;
use mealmind_plan::PlanService;
use mealmind_settings::SettingsStore;
use mealmind_shopping::ShoppingService;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub meals: MealStore,
    pub settings: SettingsStore,
    pub plans: PlanService,
    pub shopping: ShoppingService,
    pub households: HouseholdService,
    pub importer: RecipeImporter,
}

impl AppState {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> anyhow::Result<Self> {
        Ok(Self {
            pool: read_db.clone(),
            meals: MealStore::new(read_db.clone(), write_db.clone()),
            settings: SettingsStore::new(read_db.clone(), write_db.clone()),
            plans: PlanService::new(read_db.clone(), write_db.clone()),
            shopping: ShoppingService::new(read_db.clone(), write_db.clone()),
            households: HouseholdService::new(read_db, write_db),
            importer: RecipeImporter::new()?,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Meal library
        .route("/meals", get(get_meals).post(post_meal))
        .route(
            "/meals/{id}",
            get(get_meal).put(put_meal).delete(delete_meal),
        )
        // Settings
        .route("/settings", get(get_settings).put(put_settings))
        // Week plans
        .route("/plan", get(get_plan))
        .route("/plan/generate", post(post_generate_plan))
        .route("/plan/reroll", post(post_reroll_day))
        .route("/plan/swap", post(post_swap_days))
        .route("/plan/day", post(post_set_day_meal))
        // Shopping list
        .route("/shopping", get(get_shopping_list))
        .route("/shopping/generate", post(post_generate_shopping_list))
        .route("/shopping/toggle", post(post_toggle_shopping_item))
        .route("/shopping/reset", post(post_reset_shopping_list))
        // Households and meal requests
        .route("/households", post(post_household))
        .route("/households/join", post(post_join_household))
        .route("/households/{id}/members", get(get_household_members))
        .route("/households/{id}/requests", get(get_household_requests))
        .route("/requests", post(post_meal_request))
        .route("/requests/{id}/approve", post(post_approve_request))
        .route("/requests/{id}/decline", post(post_decline_request))
        // Recipe import
        .route("/import", post(post_import_recipe))
        .route_layer(axum::middleware::from_fn(
            crate::middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .nest("/api", api)
        .with_state(state)
}
