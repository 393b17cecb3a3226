mod household_members;
mod households;
mod meal_requests;
mod meals;
mod shopping_lists;
mod user_settings;
mod week_plans;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealmind",
    "m0001",
    vec_box![],
    vec_box![
        meals::CreateTable,
        user_settings::CreateTable,
        week_plans::CreateTable,
        shopping_lists::CreateTable,
        households::CreateTable,
        household_members::CreateTable,
        meal_requests::CreateTable
    ]
);
