use serde::{Deserialize, Serialize};

/// One line of a derived shopping list. `name` is the normalized display
/// form; `checked` is the only user-authored bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub checked: bool,
}

impl ShoppingItem {
    pub fn unchecked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked: false,
        }
    }
}
