use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour used when the user does not pick one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#CCCCCC";

/// A user-owned transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub user_id: String,
    /// 1–50 characters
    pub name: String,
    /// Hex RGB, `#RRGGBB`
    pub color: String,
}

/// Category fields supplied by the user (no id, no owner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// A category with the default grey colour.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_CATEGORY_COLOR)
    }
}

/// The categories every new account starts with.
pub fn default_categories() -> Vec<NewCategory> {
    vec![
        NewCategory::new("Alimentação", "#FFD700"),
        NewCategory::new("Transporte", "#4682B4"),
        NewCategory::new("Moradia", "#228B22"),
        NewCategory::new("Lazer", "#FF6347"),
        NewCategory::new("Saúde", "#8A2BE2"),
        NewCategory::new("Educação", "#D2691E"),
        NewCategory::new("Outros", "#A9A9A9"),
    ]
}
