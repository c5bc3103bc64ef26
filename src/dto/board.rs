use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{format_system_time, phase::VisibleRevealState},
    state::board::{Board, Category, CategoryId, Clue},
};

/// Full board as drawn by the front-end.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct BoardView {
    /// Fetch generation that produced this board.
    pub generation: u64,
    /// RFC 3339 timestamp of when loading finished.
    pub fetched_at: String,
    /// Columns in display order.
    pub categories: Vec<CategoryView>,
}

/// One board column.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct CategoryView {
    pub id: CategoryId,
    pub title: String,
    pub clues: Vec<ClueView>,
}

/// One board cell. `text` is absent while hidden; the front-end shows its placeholder.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct ClueView {
    pub state: VisibleRevealState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl From<&Clue> for ClueView {
    fn from(clue: &Clue) -> Self {
        Self {
            state: clue.state().into(),
            text: clue.visible_text().map(str::to_owned),
        }
    }
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            title: category.title.clone(),
            clues: category.clues().iter().map(ClueView::from).collect(),
        }
    }
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            generation: board.generation(),
            fetched_at: format_system_time(board.fetched_at()),
            categories: board.categories().iter().map(CategoryView::from).collect(),
        }
    }
}

/// Result of clicking a cell.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct RevealResponse {
    pub category: usize,
    pub clue: usize,
    /// State after the click.
    pub state: VisibleRevealState,
    /// Text to paint; absent when the click changed nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::board::tests::sample_board;

    #[test]
    fn view_hides_text_until_revealed() {
        let mut board = sample_board(4);
        board.reveal(1, 2).unwrap();

        let view = BoardView::from(&board);
        assert_eq!(view.generation, 4);
        assert_eq!(view.categories.len(), 6);
        assert!(view.categories.iter().all(|c| c.clues.len() == 5));
        assert_eq!(view.categories[1].title, "category 1");

        let shown = &view.categories[1].clues[2];
        assert_eq!(shown.state, VisibleRevealState::Question);
        assert_eq!(shown.text.as_deref(), Some("q1-2"));

        let hidden = serde_json::to_value(&view.categories[0].clues[0]).unwrap();
        assert_eq!(hidden, serde_json::json!({ "state": "hidden" }));
    }
}
