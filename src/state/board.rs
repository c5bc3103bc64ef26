//! Board data model: categories, clues and their reveal state.

use std::{fmt, time::SystemTime};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    dao::models::ClueEntity,
    state::state_machine::{Generation, RevealState},
};

/// Number of categories (columns) on a board.
pub const CATEGORIES_PER_BOARD: usize = 6;
/// Number of clues (rows) in each category.
pub const CLUES_PER_CATEGORY: usize = 5;

/// Opaque identifier used to request a category from the trivia API.
///
/// The API may hand out integers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Wrap a raw identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(value) => Self(value.to_string()),
            RawId::Signed(value) => Self(value.to_string()),
            RawId::Text(value) => Self(value),
        })
    }
}

/// Errors raised when building or addressing a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A cell coordinate falls outside the 6×5 grid.
    #[error(
        "cell ({category}, {clue}) is outside the {columns}x{rows} board",
        columns = CATEGORIES_PER_BOARD,
        rows = CLUES_PER_CATEGORY
    )]
    IndexOutOfRange {
        /// Requested category (column) index.
        category: usize,
        /// Requested clue (row) index.
        clue: usize,
    },
    /// A category was assembled with the wrong number of clues.
    #[error("category `{category}` needs {expected} clues, got {actual}", expected = CLUES_PER_CATEGORY)]
    ClueCount {
        /// Category being assembled.
        category: CategoryId,
        /// Number of clues provided.
        actual: usize,
    },
    /// A board was assembled with the wrong number of categories.
    #[error("board needs {expected} categories, got {actual}", expected = CATEGORIES_PER_BOARD)]
    CategoryCount {
        /// Number of categories provided.
        actual: usize,
    },
}

/// A single question/answer pair and how much of it has been shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    /// Text shown on the first click.
    pub question: String,
    /// Text shown on the second click.
    pub answer: String,
    state: RevealState,
}

impl Clue {
    /// Build a hidden clue.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    /// Current reveal state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Text currently visible for this clue, `None` while hidden.
    pub fn visible_text(&self) -> Option<&str> {
        match self.state {
            RevealState::Hidden => None,
            RevealState::Question => Some(&self.question),
            RevealState::Answer => Some(&self.answer),
        }
    }

    /// Advance the reveal state by one click.
    ///
    /// Returns the text to paint, or `None` once the answer is already showing.
    pub fn reveal(&mut self) -> Option<&str> {
        self.state = self.state.advance()?;
        self.visible_text()
    }
}

impl From<ClueEntity> for Clue {
    fn from(value: ClueEntity) -> Self {
        Self::new(value.question, value.answer)
    }
}

/// One board column: a titled set of exactly [`CLUES_PER_CATEGORY`] clues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Identifier the category was fetched with.
    pub id: CategoryId,
    /// Column header.
    pub title: String,
    clues: [Clue; CLUES_PER_CATEGORY],
}

impl Category {
    /// Assemble a category, rejecting clue lists of the wrong length.
    pub fn new(id: CategoryId, title: String, clues: Vec<Clue>) -> Result<Self, BoardError> {
        let actual = clues.len();
        let clues: [Clue; CLUES_PER_CATEGORY] = clues
            .try_into()
            .map_err(|_| BoardError::ClueCount {
                category: id.clone(),
                actual,
            })?;
        Ok(Self { id, title, clues })
    }

    /// Clues in row order.
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }
}

/// The 6×5 grid currently in play, tagged with the fetch phase that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    generation: Generation,
    fetched_at: SystemTime,
    categories: [Category; CATEGORIES_PER_BOARD],
}

impl Board {
    /// Assemble a board from categories in display order.
    pub fn new(generation: Generation, categories: Vec<Category>) -> Result<Self, BoardError> {
        let actual = categories.len();
        let categories: [Category; CATEGORIES_PER_BOARD] = categories
            .try_into()
            .map_err(|_| BoardError::CategoryCount { actual })?;
        Ok(Self {
            generation,
            fetched_at: SystemTime::now(),
            categories,
        })
    }

    /// Generation of the fetch phase that produced this board.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// When the board finished loading.
    pub fn fetched_at(&self) -> SystemTime {
        self.fetched_at
    }

    /// Categories in column order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a clue by coordinate.
    pub fn get(&self, category: usize, clue: usize) -> Result<&Clue, BoardError> {
        self.categories
            .get(category)
            .and_then(|column| column.clues.get(clue))
            .ok_or(BoardError::IndexOutOfRange { category, clue })
    }

    /// Click a cell: advance its clue and return the text to paint, if any.
    pub fn reveal(&mut self, category: usize, clue: usize) -> Result<Option<String>, BoardError> {
        let cell = self
            .categories
            .get_mut(category)
            .and_then(|column| column.clues.get_mut(clue))
            .ok_or(BoardError::IndexOutOfRange { category, clue })?;
        Ok(cell.reveal().map(str::to_owned))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_category(id: u64) -> Category {
        let clues = (0..CLUES_PER_CATEGORY)
            .map(|row| Clue::new(format!("q{id}-{row}"), format!("a{id}-{row}")))
            .collect();
        Category::new(id.into(), format!("category {id}"), clues).unwrap()
    }

    pub(crate) fn sample_board(generation: Generation) -> Board {
        let categories = (0..CATEGORIES_PER_BOARD as u64).map(sample_category).collect();
        Board::new(generation, categories).unwrap()
    }

    #[test]
    fn reveal_walks_question_then_answer_then_stops() {
        let mut clue = Clue::new("What is 2+2?", "4");
        assert_eq!(clue.state(), RevealState::Hidden);
        assert_eq!(clue.visible_text(), None);

        assert_eq!(clue.reveal(), Some("What is 2+2?"));
        assert_eq!(clue.state(), RevealState::Question);

        assert_eq!(clue.reveal(), Some("4"));
        assert_eq!(clue.state(), RevealState::Answer);

        for _ in 0..3 {
            assert_eq!(clue.reveal(), None);
            assert_eq!(clue.state(), RevealState::Answer);
        }
        assert_eq!(clue.visible_text(), Some("4"));
    }

    #[test]
    fn every_in_range_cell_is_addressable() {
        let board = sample_board(1);
        for category in 0..CATEGORIES_PER_BOARD {
            for row in 0..CLUES_PER_CATEGORY {
                let clue = board.get(category, row).unwrap();
                assert_eq!(clue.question, format!("q{category}-{row}"));
                assert_eq!(clue.state(), RevealState::Hidden);
            }
        }
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let mut board = sample_board(1);
        for (category, clue) in [(6, 0), (0, 5), (6, 5), (usize::MAX, 0), (0, usize::MAX)] {
            assert_eq!(
                board.get(category, clue).unwrap_err(),
                BoardError::IndexOutOfRange { category, clue }
            );
            assert_eq!(
                board.reveal(category, clue).unwrap_err(),
                BoardError::IndexOutOfRange { category, clue }
            );
        }
    }

    #[test]
    fn board_reveal_only_touches_the_addressed_cell() {
        let mut board = sample_board(3);
        assert_eq!(board.reveal(2, 4).unwrap().as_deref(), Some("q2-4"));
        assert_eq!(board.reveal(2, 4).unwrap().as_deref(), Some("a2-4"));
        assert_eq!(board.reveal(2, 4).unwrap(), None);

        assert_eq!(board.get(2, 3).unwrap().state(), RevealState::Hidden);
        assert_eq!(board.get(3, 4).unwrap().state(), RevealState::Hidden);
    }

    #[test]
    fn wrong_sizes_are_rejected() {
        let err = Category::new("7".into(), "short".into(), vec![Clue::new("q", "a")]).unwrap_err();
        assert_eq!(
            err,
            BoardError::ClueCount {
                category: "7".into(),
                actual: 1,
            }
        );

        let categories = (0..5).map(sample_category).collect();
        assert_eq!(
            Board::new(1, categories).unwrap_err(),
            BoardError::CategoryCount { actual: 5 }
        );
    }

    #[test]
    fn category_ids_accept_numbers_and_strings() {
        let ids: Vec<CategoryId> = serde_json::from_str(r#"[11496, "abc", -3]"#).unwrap();
        assert_eq!(
            ids,
            vec![CategoryId::from(11496u64), CategoryId::from("abc"), CategoryId::from("-3")]
        );
        assert_eq!(serde_json::to_string(&ids[0]).unwrap(), r#""11496""#);
    }
}
