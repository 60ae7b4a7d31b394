use serde::{Deserialize, Serialize};

/// Shape of the tag appended to a series member's description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    /// `"<base> (k/n)"`
    Installment,
    /// `"<base> (Mês k/n)"`
    RecurringIncome,
}

impl SeriesKind {
    /// Literal text between `" ("` and the position number.
    pub fn tag_prefix(&self) -> &'static str {
        match self {
            SeriesKind::Installment => "",
            SeriesKind::RecurringIncome => "Mês ",
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Installment => write!(f, "installment"),
            SeriesKind::RecurringIncome => write!(f, "recurring income"),
        }
    }
}

/// What a tagged description says about its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub kind: SeriesKind,
    /// Description with the tag removed
    pub base: String,
    /// 1-based position in the series
    pub position: u32,
    /// Series length at generation time
    pub total: u32,
}
