use serde::{Deserialize, Serialize};

/// A single ingredient line. `quantity` is opaque display text, no unit
/// normalization happens anywhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    /// Insertion order preserved for display, order-irrelevant for matching.
    pub tags: Vec<String>,
    pub cook_time_minutes: u32,
    pub ingredients: Vec<Ingredient>,
}
