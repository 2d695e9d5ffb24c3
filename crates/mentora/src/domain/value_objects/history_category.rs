//! HistoryCategory - Classification of recorded interactions

use serde::{Deserialize, Serialize};

/// Category tag attached to a history entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryCategory {
    #[default]
    Question,
    Document,
    StudyPlan,
}

impl std::fmt::Display for HistoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryCategory::Question => write!(f, "question"),
            HistoryCategory::Document => write!(f, "document"),
            HistoryCategory::StudyPlan => write!(f, "study_plan"),
        }
    }
}

impl std::str::FromStr for HistoryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "question" => Ok(HistoryCategory::Question),
            "document" => Ok(HistoryCategory::Document),
            "study_plan" => Ok(HistoryCategory::StudyPlan),
            _ => Err(format!("Unknown history category: {}", s)),
        }
    }
}
