use serde::Deserialize;

use crate::state::board::CategoryId;

/// Entry returned by the "list categories" endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySummaryEntity {
    pub id: CategoryId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub clues_count: Option<u32>,
}

/// Payload returned by the "get category" endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntity {
    pub title: String,
    pub clues: Vec<ClueEntity>,
}

/// Raw clue as sent by the trivia API; extra fields (value, airdate, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ClueEntity {
    pub question: String,
    pub answer: String,
}
