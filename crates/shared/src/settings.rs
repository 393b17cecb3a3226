use serde::{Deserialize, Serialize};

/// Per-user planning preferences. Exactly one active record per user; reads
/// fall back to `Settings::default()` when nothing has been saved yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dinners_per_week: u8,
    pub max_cook_time_minutes: u32,
    /// Case-insensitive substring matches against ingredient names.
    pub excluded_ingredients: Vec<String>,
    pub allow_repeats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dinners_per_week: 5,
            max_cook_time_minutes: 45,
            excluded_ingredients: vec![],
            allow_repeats: false,
        }
    }
}
